//! 同步服务（全量对账引擎）
//!
//! Drives one full reconciliation run: fetch every remote zone, diff the
//! cache against the live set (upsert + delete-missing), then walk the
//! zones in fetch order reconciling each zone's DNS records, analytics
//! counters, and DNSSEC status. Runs synchronously on the triggering task;
//! progress is polled and cancellation requested through the shared
//! tracker/token owned by this service.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::progress::{CancelToken, SyncProgress, SyncTracker};
use crate::services::ServiceContext;
use crate::types::{
    AnalyticsSummary, DnsRecord, FetchOutcome, ProviderZone, SyncReport, Zone, ZoneBatchOutcome,
};

/// 流量汇总的统计窗口（天）
const ANALYTICS_WINDOW_DAYS: u32 = 30;

/// 收尾阶段 `last_updated` 的刷新窗口：只重写缺失或早于此窗口的时间戳
const STALENESS_WINDOW: Duration = Duration::from_secs(60);

const PHASE_FETCHING: &str = "Fetching zones from remote provider...";
const PHASE_UPDATING: &str = "Updating zones in database...";
const PHASE_PER_ZONE: &str = "Syncing DNS records, analytics, and DNSSEC status...";
const PHASE_FINALIZING: &str = "Finalizing sync...";
const PHASE_CANCELLED: &str = "Cancelled by user";

/// 同步服务
pub struct SyncService {
    ctx: Arc<ServiceContext>,
    tracker: Arc<SyncTracker>,
    cancel: CancelToken,
}

impl SyncService {
    /// 创建同步服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            tracker: Arc::new(SyncTracker::new()),
            cancel: CancelToken::new(),
        }
    }

    /// 进度快照（供轮询端点使用）
    #[must_use]
    pub fn progress(&self) -> SyncProgress {
        self.tracker.snapshot()
    }

    /// 进度追踪器句柄
    #[must_use]
    pub fn tracker(&self) -> Arc<SyncTracker> {
        Arc::clone(&self.tracker)
    }

    /// 取消令牌句柄（在 zone 边界被轮询）
    #[must_use]
    pub fn cancellation_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 请求取消当前运行。
    ///
    /// 协作式：运行在下一个 zone 边界观察到令牌后停止，已提交的 zone 不回滚。
    /// 没有活动运行时无效，返回 `false`。
    pub fn cancel(&self) -> bool {
        if !self.tracker.is_active() {
            return false;
        }
        self.cancel.cancel();
        log::info!("Sync cancellation requested");
        true
    }

    /// 执行一次全量同步。
    ///
    /// # Errors
    /// - [`CoreError::SyncInProgress`] — 已有运行在进行中，本次请求被拒绝
    /// - [`CoreError::EmptyZoneFetch`] — 远端返回零个 zone（与故障不可区分，
    ///   不清空缓存，直接报失败）
    /// - [`CoreError::StorageError`] — zone 批次的删除语句失败（系统性故障）
    pub async fn sync_all_zones(&self) -> CoreResult<SyncReport> {
        self.tracker.begin(PHASE_FETCHING)?;
        self.cancel.reset();

        let result = self.run().await;

        match &result {
            Ok(report) if report.cancelled => self.tracker.finish(Some(PHASE_CANCELLED)),
            _ => self.tracker.finish(None),
        }
        result
    }

    async fn run(&self) -> CoreResult<SyncReport> {
        log::info!("Starting zone synchronization from remote provider...");
        let fetch = self.ctx.provider.fetch_zones().await;

        if fetch.items.is_empty() {
            // 零 zone 的账户与一次 API 故障不可区分；绝不基于空结果清缓存
            log::error!("No zones found in remote account; leaving the cache untouched");
            return Err(CoreError::EmptyZoneFetch);
        }

        log::info!("Fetched {} zones from remote provider", fetch.items.len());
        self.tracker.set_total(fetch.items.len());
        self.tracker.set_phase(PHASE_UPDATING);

        let mut report = SyncReport {
            total_zones: fetch.items.len(),
            ..SyncReport::default()
        };

        let zones = self.reconcile_zone_batch(fetch, &mut report.zone_batch).await?;

        self.tracker.set_phase(PHASE_PER_ZONE);

        for (index, zone) in zones.iter().enumerate() {
            if self.cancel.is_cancelled() {
                log::info!("Sync operation cancelled by user");
                report.cancelled = true;
                return Ok(report);
            }

            self.tracker.zone_started(index, &zone.name);
            log::info!(
                "Syncing zone {}/{}: {} ({})",
                index + 1,
                zones.len(),
                zone.name,
                zone.id
            );

            let dns_ok = self.reconcile_zone_records(&zone.id, &mut report).await;
            let analytics_ok = self.refresh_zone_analytics(&zone.id).await;
            report.dnssec_checked +=
                usize::from(self.check_zone_dnssec(&zone.id, &zone.name).await);

            if dns_ok && analytics_ok {
                report.zones_synced += 1;
                log::info!("Successfully synced zone {}", zone.name);
            } else {
                report.zones_failed += 1;
                log::error!("Failed to sync zone {}", zone.name);
            }

            self.tracker.set_processed(index + 1);
        }

        self.tracker.set_phase(PHASE_FINALIZING);
        match self.ctx.zone_repository.touch_stale(STALENESS_WINDOW).await {
            Ok(touched) => {
                report.zones_touched = touched;
                log::info!("Refreshed last_updated timestamp for {touched} zones");
            }
            Err(e) => {
                log::error!("Failed to refresh last_updated timestamps: {e}");
            }
        }

        report.success = report.zones_failed == 0
            && report.zone_batch.skipped == 0
            && report.zone_batch.deletions_applied;

        log::info!(
            "Sync completed: {} zones synced successfully, {} failed, {} DNSSEC statuses checked",
            report.zones_synced,
            report.zones_failed,
            report.dnssec_checked
        );
        Ok(report)
    }

    /// Zone 批次对账：逐行 upsert（行级错误跳过并计数），然后对完整的
    /// 远端结果集做差集删除。不完整的抓取绝不驱动删除。
    async fn reconcile_zone_batch(
        &self,
        fetch: FetchOutcome<ProviderZone>,
        batch: &mut ZoneBatchOutcome,
    ) -> CoreResult<Vec<Zone>> {
        let complete = fetch.complete;
        let mut zones = Vec::with_capacity(fetch.items.len());
        let mut keep = Vec::with_capacity(fetch.items.len());

        for payload in fetch.items {
            let zone = match Zone::from_provider(payload) {
                Ok(zone) => zone,
                Err(e) => {
                    log::warn!("Skipping zone with missing ID: {e}");
                    batch.skipped += 1;
                    continue;
                }
            };

            // 行级 upsert 失败也要保住已有的缓存行，id 先记入保留集
            keep.push(zone.id.clone());

            match self.ctx.zone_repository.upsert(&zone).await {
                Ok(()) => batch.upserted += 1,
                Err(e) => {
                    log::error!("Error processing zone {} ({}): {e}", zone.id, zone.name);
                    batch.skipped += 1;
                }
            }
            zones.push(zone);
        }

        if complete {
            let deleted = self.ctx.zone_repository.delete_not_in(&keep).await?;
            if deleted > 0 {
                log::info!("Removed {deleted} zones that no longer exist remotely");
            }
            batch.deleted = deleted;
            batch.deletions_applied = true;
        } else {
            log::warn!(
                "Zone fetch was incomplete; skipping stale-zone deletion for this run"
            );
        }

        log::info!(
            "Zone update complete: {} upserted, {} deleted, {} errors",
            batch.upserted,
            batch.deleted,
            batch.skipped
        );
        Ok(zones)
    }

    /// 对账单个 zone 的 DNS 记录集。返回该子步骤是否成功。
    async fn reconcile_zone_records(&self, zone_id: &str, report: &mut SyncReport) -> bool {
        let fetch = self.ctx.provider.fetch_records(zone_id).await;
        log::info!(
            "Fetched {} DNS records for zone {zone_id}",
            fetch.items.len()
        );
        if fetch.items.is_empty() {
            log::warn!("No DNS records returned from remote API for zone {zone_id}");
        }

        let mut keep = Vec::with_capacity(fetch.items.len());
        let mut store_ok = true;

        for payload in fetch.items {
            let record = match DnsRecord::from_provider(payload) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Skipping DNS record for zone {zone_id}: {e}");
                    report.records_skipped += 1;
                    continue;
                }
            };

            keep.push(record.id.clone());

            match self.ctx.record_repository.upsert(&record).await {
                Ok(()) => report.records_upserted += 1,
                Err(e) => {
                    log::error!("Error processing DNS record {}: {e}", record.id);
                    report.records_skipped += 1;
                    store_ok = false;
                }
            }
        }

        if fetch.complete {
            match self.ctx.record_repository.delete_not_in(zone_id, &keep).await {
                Ok(deleted) => {
                    report.records_deleted += deleted;
                    if deleted > 0 {
                        log::info!(
                            "Removed {deleted} DNS records of zone {zone_id} that no longer exist remotely"
                        );
                    }
                }
                Err(e) => {
                    log::error!("Failed to delete stale DNS records for zone {zone_id}: {e}");
                    store_ok = false;
                }
            }
        } else {
            log::warn!(
                "Record fetch for zone {zone_id} was incomplete; skipping record deletion"
            );
            store_ok = false;
        }

        store_ok
    }

    /// 刷新单个 zone 的流量汇总。远端失败写入零值（observed-at 置空），
    /// 仅存储写入失败才算子步骤失败。
    async fn refresh_zone_analytics(&self, zone_id: &str) -> bool {
        let summary = match self
            .ctx
            .provider
            .zone_analytics(zone_id, ANALYTICS_WINDOW_DAYS)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("Failed to fetch analytics for zone {zone_id}: {e}");
                AnalyticsSummary::default()
            }
        };

        match self
            .ctx
            .zone_repository
            .update_analytics(zone_id, &summary)
            .await
        {
            Ok(()) => {
                log::info!(
                    "Updated analytics for zone {zone_id}: {} requests, {} bytes, {} threats",
                    summary.requests,
                    summary.bandwidth,
                    summary.threats
                );
                true
            }
            Err(e) => {
                log::error!("Failed to store analytics for zone {zone_id}: {e}");
                false
            }
        }
    }

    /// 检查并记录单个 zone 的 DNSSEC 状态。尽力而为：任何失败都不影响
    /// 本 zone 或整次运行的成败统计。返回是否检查成功。
    async fn check_zone_dnssec(&self, zone_id: &str, zone_name: &str) -> bool {
        let status = match self.ctx.provider.dnssec_status(zone_id).await {
            Ok(status) => status,
            Err(e) => {
                log::debug!("Could not check DNSSEC for zone {zone_name}: {e}");
                return false;
            }
        };

        match self
            .ctx
            .zone_repository
            .update_dnssec_status(zone_id, status)
            .await
        {
            Ok(()) => {
                log::debug!("Updated DNSSEC status for {zone_name}: {status}");
                true
            }
            Err(e) => {
                log::debug!("Could not store DNSSEC status for {zone_name}: {e}");
                false
            }
        }
    }
}
