//! 安全审计服务（DNSSEC 普查）
//!
//! Walks the cached zone inventory and checks each zone's DNSSEC status
//! against the remote API, collecting every zone where the feature is not
//! active together with a posture analysis of its record set. Independent
//! of the reconciler, but reuses the same single-slot tracker pattern for
//! its own long-running scan.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::posture::{PostureAnalysis, analyze_records};
use crate::progress::{AuditProgress, AuditTracker};
use crate::services::ServiceContext;
use crate::types::{AuditReport, AuditedZone, DnssecStatus, Zone};

/// 安全审计服务
pub struct SecurityAuditService {
    ctx: Arc<ServiceContext>,
    tracker: Arc<AuditTracker>,
}

impl SecurityAuditService {
    /// 创建审计服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            tracker: Arc::new(AuditTracker::new()),
        }
    }

    /// 进度快照（供轮询端点使用）
    #[must_use]
    pub fn progress(&self) -> AuditProgress {
        self.tracker.snapshot()
    }

    /// 进度追踪器句柄
    #[must_use]
    pub fn tracker(&self) -> Arc<AuditTracker> {
        Arc::clone(&self.tracker)
    }

    /// 扫描全部缓存 zone，返回未启用 DNSSEC 的 zone 清单（含姿态分析）。
    ///
    /// # Errors
    /// - [`crate::error::CoreError::AuditInProgress`] — 已有审计在进行中
    /// - [`crate::error::CoreError::StorageError`] — 读取缓存失败
    pub async fn find_insecure_zones(&self) -> CoreResult<AuditReport> {
        self.tracker.begin()?;
        let result = self.run().await;
        self.tracker.finish();
        result
    }

    async fn run(&self) -> CoreResult<AuditReport> {
        let zones = self.ctx.zone_repository.find_all().await?;
        let total_checked = zones.len();
        self.tracker.set_total(total_checked);

        log::info!("Starting DNSSEC check for {total_checked} zones");

        let mut flagged = Vec::new();

        for zone in zones {
            self.tracker.zone_started(&zone.name);

            let posture = match self.ctx.provider.dnssec_status(&zone.id).await {
                Ok(DnssecStatus::Active) => None,
                Ok(_) => Some(self.analyze_zone(&zone).await),
                Err(e) => {
                    // Undeterminable status: flag the zone rather than
                    // silently treating it as secure
                    log::warn!("Could not check DNSSEC for zone {}: {e}", zone.name);
                    Some(PostureAnalysis::unknown())
                }
            };

            let insecure = posture.is_some();
            if let Some(posture) = posture {
                log::info!(
                    "Zone {} has no DNSSEC - Recommendation: {}",
                    zone.name,
                    posture.recommendation
                );
                flagged.push(AuditedZone { zone, posture });
            }

            let processed = self.tracker.zone_checked(insecure);
            if processed % 10 == 0 {
                log::info!("DNSSEC check progress: {processed}/{total_checked} zones processed");
            }
        }

        log::info!(
            "DNSSEC check completed: {} zones without DNSSEC out of {total_checked}",
            flagged.len()
        );

        Ok(AuditReport {
            without_security: flagged.len(),
            zones: flagged,
            total_checked,
        })
    }

    /// 拉取 zone 的记录集并做姿态分析；拉取不完整时返回 Unknown。
    async fn analyze_zone(&self, zone: &Zone) -> PostureAnalysis {
        let fetch = self.ctx.provider.fetch_records(&zone.id).await;
        if !fetch.complete {
            log::warn!(
                "Could not analyze DNS records for zone {}: record fetch incomplete",
                zone.name
            );
            return PostureAnalysis::unknown();
        }
        analyze_records(&fetch.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::posture::{ActivityLevel, SecurityRecommendation};
    use crate::test_utils::{
        InMemoryRecordRepository, InMemoryZoneRepository, MockProvider, provider_record,
        provider_zone,
    };
    use crate::traits::{DnsRecordRepository, ZoneRepository};
    use crate::types::FetchOutcome;
    use zone_mirror_provider::ZoneProvider;

    fn service_with(
        provider: Arc<MockProvider>,
    ) -> (SecurityAuditService, Arc<InMemoryZoneRepository>) {
        let zone_repo = Arc::new(InMemoryZoneRepository::new());
        let record_repo = Arc::new(InMemoryRecordRepository::new());
        let ctx = Arc::new(ServiceContext::new(
            Arc::clone(&zone_repo) as Arc<dyn ZoneRepository>,
            record_repo as Arc<dyn DnsRecordRepository>,
            provider as Arc<dyn ZoneProvider>,
        ));
        (SecurityAuditService::new(ctx), zone_repo)
    }

    #[tokio::test]
    async fn zones_with_active_dnssec_are_not_flagged() {
        let provider = Arc::new(MockProvider::new());
        provider.set_dnssec_status("zone-a", DnssecStatus::Active);
        provider.set_dnssec_status("zone-b", DnssecStatus::Disabled);
        provider.set_records(
            "zone-b",
            FetchOutcome::complete(vec![provider_record("rec-1", "zone-b", "A", "1.2.3.4")]),
        );

        let (service, zone_repo) = service_with(provider);
        zone_repo.seed(provider_zone("zone-a", "a.com"));
        zone_repo.seed(provider_zone("zone-b", "b.com"));

        let result = service.find_insecure_zones().await;
        assert!(result.is_ok(), "expected Ok(..), got {result:?}");
        let Ok(report) = result else {
            return;
        };

        assert_eq!(report.total_checked, 2);
        assert_eq!(report.without_security, 1);
        assert_eq!(report.zones.len(), 1);
        assert_eq!(report.zones[0].zone.id, "zone-b");
        assert_eq!(
            report.zones[0].posture.recommendation,
            SecurityRecommendation::HighlyRecommended
        );
    }

    #[tokio::test]
    async fn undeterminable_status_is_flagged_as_unknown() {
        let provider = Arc::new(MockProvider::new());
        provider.fail_dnssec_status("zone-a");

        let (service, zone_repo) = service_with(provider);
        zone_repo.seed(provider_zone("zone-a", "a.com"));

        let result = service.find_insecure_zones().await;
        assert!(result.is_ok(), "expected Ok(..), got {result:?}");
        let Ok(report) = result else {
            return;
        };

        assert_eq!(report.without_security, 1);
        assert_eq!(
            report.zones[0].posture.recommendation,
            SecurityRecommendation::Unknown
        );
        assert_eq!(
            report.zones[0].posture.activity_level,
            ActivityLevel::Unknown
        );
    }

    #[tokio::test]
    async fn incomplete_record_fetch_yields_unknown_posture() {
        let provider = Arc::new(MockProvider::new());
        provider.set_dnssec_status("zone-a", DnssecStatus::Pending);
        provider.set_records(
            "zone-a",
            FetchOutcome::truncated(vec![provider_record("rec-1", "zone-a", "A", "1.2.3.4")]),
        );

        let (service, zone_repo) = service_with(provider);
        zone_repo.seed(provider_zone("zone-a", "a.com"));

        let result = service.find_insecure_zones().await;
        assert!(result.is_ok(), "expected Ok(..), got {result:?}");
        let Ok(report) = result else {
            return;
        };

        assert_eq!(
            report.zones[0].posture.recommendation,
            SecurityRecommendation::Unknown
        );
    }

    #[tokio::test]
    async fn concurrent_audit_is_rejected() {
        let provider = Arc::new(MockProvider::new());
        let (service, _) = service_with(provider);

        let claim = service.tracker().begin();
        assert!(claim.is_ok(), "expected Ok(..), got {claim:?}");

        let result = service.find_insecure_zones().await;
        assert!(
            matches!(result, Err(CoreError::AuditInProgress)),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn empty_cache_yields_empty_report() {
        let provider = Arc::new(MockProvider::new());
        let (service, _) = service_with(provider);

        let result = service.find_insecure_zones().await;
        assert!(result.is_ok(), "expected Ok(..), got {result:?}");
        let Ok(report) = result else {
            return;
        };

        assert_eq!(report.total_checked, 0);
        assert_eq!(report.without_security, 0);
        assert!(report.zones.is_empty());
        assert!(!service.progress().checking);
    }
}
