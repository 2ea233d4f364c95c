//! Cloudflare ZoneProvider trait 实现

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::{ErrorContext, ZoneProvider};
use crate::types::{
    AnalyticsSummary, DnssecStatus, FetchOutcome, ProviderDnsRecord, ProviderZone, ZoneStatus,
};

use super::types::AnalyticsData;
use super::{
    CloudflareDnsRecord, CloudflareDnssec, CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES, MAX_PAGE_WALK,
};

/// Zone 流量汇总的 GraphQL 查询
const ANALYTICS_QUERY: &str = r"
query GetZoneAnalytics($zoneTag: String!, $since: String!, $until: String!) {
  viewer {
    zones(filter: {zoneTag: $zoneTag}) {
      httpRequests1dGroups(
        limit: 10,
        filter: {
          date_geq: $since,
          date_leq: $until
        }
      ) {
        sum {
          requests
          bytes
          threats
        }
      }
    }
  }
}
";

impl CloudflareProvider {
    /// 将 Cloudflare zone 转换为 `ProviderZone`，嵌套字段在此展平并填默认值
    pub(crate) fn zone_to_provider_zone(zone: CloudflareZone) -> ProviderZone {
        let (account_id, account_name) = zone
            .account
            .map_or_else(|| (String::new(), String::new()), |a| (a.id, a.name));

        ProviderZone {
            id: zone.id,
            name: zone.name,
            status: ZoneStatus::from_remote(&zone.status),
            zone_type: zone.zone_type,
            plan_name: zone.plan.map(|p| p.name).unwrap_or_default(),
            name_servers: zone.name_servers.unwrap_or_default(),
            original_name_servers: zone.original_name_servers.unwrap_or_default(),
            created_on: zone.created_on.unwrap_or_default(),
            modified_on: zone.modified_on.unwrap_or_default(),
            account_id,
            account_name,
            owner_email: zone.owner.and_then(|o| o.email).unwrap_or_default(),
            activated_on: zone.activated_on.unwrap_or_default(),
        }
    }

    /// 将 Cloudflare 记录转换为 `ProviderDnsRecord`
    pub(crate) fn cf_record_to_provider_record(
        record: CloudflareDnsRecord,
        zone_id: &str,
    ) -> ProviderDnsRecord {
        ProviderDnsRecord {
            id: record.id,
            zone_id: zone_id.to_string(),
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            ttl: record.ttl,
            proxied: record.proxied,
            priority: record.priority,
            created_on: record.created_on,
            modified_on: record.modified_on,
        }
    }

    /// 遍历一个分页集合端点的全部分页。
    ///
    /// 单页失败时记录日志并停止翻页，返回已累积的部分结果（`complete = false`）；
    /// 翻页数超过 `MAX_PAGE_WALK` 时同样截断。
    async fn walk_pages<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        per_page: u32,
    ) -> FetchOutcome<T> {
        let mut items: Vec<T> = Vec::new();
        let mut page = 1u32;

        loop {
            match self.get_page::<T>(path, page, per_page).await {
                Ok((batch, total_count)) => {
                    items.extend(batch);
                    if page.saturating_mul(per_page) >= total_count {
                        return FetchOutcome::complete(items);
                    }
                    if page >= MAX_PAGE_WALK {
                        log::warn!(
                            "Page cap of {MAX_PAGE_WALK} reached while walking {path}; \
                             returning {} items as an incomplete fetch",
                            items.len()
                        );
                        return FetchOutcome::truncated(items);
                    }
                    page += 1;
                }
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("Failed to fetch page {page} of {path}: {e}");
                    } else {
                        log::error!("Failed to fetch page {page} of {path}: {e}");
                    }
                    return FetchOutcome::truncated(items);
                }
            }
        }
    }
}

#[async_trait]
impl ZoneProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct UserResponse {
            #[serde(default)]
            #[allow(dead_code)]
            id: String,
        }

        match self
            .get::<UserResponse>("/user", ErrorContext::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_expected() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn fetch_zones(&self) -> FetchOutcome<ProviderZone> {
        let outcome = self.walk_pages::<CloudflareZone>("/zones", MAX_PAGE_SIZE_ZONES).await;
        FetchOutcome {
            items: outcome
                .items
                .into_iter()
                .map(Self::zone_to_provider_zone)
                .collect(),
            complete: outcome.complete,
        }
    }

    async fn fetch_records(&self, zone_id: &str) -> FetchOutcome<ProviderDnsRecord> {
        let path = format!("/zones/{zone_id}/dns_records");
        let outcome = self
            .walk_pages::<CloudflareDnsRecord>(&path, MAX_PAGE_SIZE_RECORDS)
            .await;
        FetchOutcome {
            items: outcome
                .items
                .into_iter()
                .map(|r| Self::cf_record_to_provider_record(r, zone_id))
                .collect(),
            complete: outcome.complete,
        }
    }

    async fn dnssec_status(&self, zone_id: &str) -> Result<DnssecStatus> {
        let context = ErrorContext {
            zone_id: Some(zone_id.to_string()),
        };
        let dnssec: CloudflareDnssec = self
            .get(&format!("/zones/{zone_id}/dnssec"), context)
            .await?;
        Ok(DnssecStatus::from_remote(&dnssec.status))
    }

    async fn set_dnssec_status(
        &self,
        zone_id: &str,
        status: DnssecStatus,
    ) -> Result<DnssecStatus> {
        #[derive(Serialize)]
        struct SetDnssecBody {
            status: &'static str,
        }

        let context = ErrorContext {
            zone_id: Some(zone_id.to_string()),
        };
        let body = SetDnssecBody {
            status: status.as_str(),
        };
        let dnssec: CloudflareDnssec = self
            .patch(&format!("/zones/{zone_id}/dnssec"), &body, context)
            .await?;
        Ok(DnssecStatus::from_remote(&dnssec.status))
    }

    async fn zone_analytics(&self, zone_id: &str, window_days: u32) -> Result<AnalyticsSummary> {
        #[derive(Serialize)]
        struct AnalyticsRequest {
            query: &'static str,
            variables: AnalyticsVariables,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct AnalyticsVariables {
            zone_tag: String,
            since: String,
            until: String,
        }

        let until = Utc::now();
        let since = until - Duration::days(i64::from(window_days));

        let request = AnalyticsRequest {
            query: ANALYTICS_QUERY,
            variables: AnalyticsVariables {
                zone_tag: zone_id.to_string(),
                since: since.format("%Y-%m-%d").to_string(),
                until: until.format("%Y-%m-%d").to_string(),
            },
        };

        let data: AnalyticsData = self.post_graphql(&request).await?;

        // 窗口内无数据时 GraphQL 返回空的 group 列表，视为零流量
        let (requests, bandwidth, threats) = data
            .viewer
            .zones
            .first()
            .and_then(|zone| zone.http_requests_1d_groups.first())
            .map_or((0, 0, 0), |group| {
                (group.sum.requests, group.sum.bytes, group.sum.threats)
            });

        Ok(AnalyticsSummary {
            requests,
            bandwidth,
            threats,
            observed_at: Some(Utc::now()),
        })
    }
}
