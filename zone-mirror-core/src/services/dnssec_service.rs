//! DNSSEC 批量启用服务

use std::sync::Arc;

use crate::services::ServiceContext;
use crate::types::{
    BulkEnableFailure, BulkEnableOutcome, BulkEnableSuccess, DnssecStatus,
};

/// DNSSEC 批量启用服务
pub struct DnssecService {
    ctx: Arc<ServiceContext>,
}

impl DnssecService {
    /// 创建 DNSSEC 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 为一批 zone 启用 DNSSEC。
    ///
    /// 尽力而为：单个 zone 的失败不影响其余 zone，结果永远是结构化的
    /// 成功/失败清单，而不是单一的通过/失败。
    pub async fn enable_for_zones(&self, zone_ids: &[String]) -> BulkEnableOutcome {
        log::info!("Starting bulk DNSSEC enable for {} zones", zone_ids.len());

        // 并行下发所有启用请求
        let enable_futures: Vec<_> = zone_ids
            .iter()
            .map(|zone_id| async move {
                let name = self.ctx.zone_display_name(zone_id).await;
                match self
                    .ctx
                    .provider
                    .set_dnssec_status(zone_id, DnssecStatus::Active)
                    .await
                {
                    Ok(_) => Ok(BulkEnableSuccess {
                        zone_id: zone_id.clone(),
                        name,
                    }),
                    Err(e) => Err(BulkEnableFailure {
                        zone_id: zone_id.clone(),
                        name,
                        reason: e.to_string(),
                    }),
                }
            })
            .collect();

        let results = futures::future::join_all(enable_futures).await;

        let mut outcome = BulkEnableOutcome {
            total: zone_ids.len(),
            ..BulkEnableOutcome::default()
        };

        for result in results {
            match result {
                Ok(success) => {
                    log::info!("Successfully enabled DNSSEC for zone {}", success.name);
                    outcome.enabled.push(success);
                }
                Err(failure) => {
                    log::warn!(
                        "Failed to enable DNSSEC for zone {}: {}",
                        failure.name,
                        failure.reason
                    );
                    outcome.failed.push(failure);
                }
            }
        }

        log::info!(
            "Bulk DNSSEC enable completed: {} successful, {} failed",
            outcome.enabled.len(),
            outcome.failed.len()
        );
        outcome
    }
}
