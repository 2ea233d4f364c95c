//! 业务逻辑服务层

mod audit_service;
mod dnssec_service;
mod sync_service;

pub use audit_service::SecurityAuditService;
pub use dnssec_service::DnssecService;
pub use sync_service::SyncService;

use std::sync::Arc;

use zone_mirror_provider::ZoneProvider;

use crate::traits::{DnsRecordRepository, ZoneRepository};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现与远端 Provider。
pub struct ServiceContext {
    /// Zone 缓存仓库
    pub zone_repository: Arc<dyn ZoneRepository>,
    /// DNS 记录缓存仓库
    pub record_repository: Arc<dyn DnsRecordRepository>,
    /// 远端 zone 清单 Provider
    pub provider: Arc<dyn ZoneProvider>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        zone_repository: Arc<dyn ZoneRepository>,
        record_repository: Arc<dyn DnsRecordRepository>,
        provider: Arc<dyn ZoneProvider>,
    ) -> Self {
        Self {
            zone_repository,
            record_repository,
            provider,
        }
    }

    /// 解析 zone 的展示名称：缓存里有就用缓存名，否则退回 id
    pub async fn zone_display_name(&self, zone_id: &str) -> String {
        match self.zone_repository.find_by_id(zone_id).await {
            Ok(Some(zone)) => zone.name,
            _ => zone_id.to_string(),
        }
    }
}
