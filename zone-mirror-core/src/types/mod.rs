//! 类型定义模块

mod record;
mod report;
mod zone;

pub use record::DnsRecord;
pub use report::{
    AuditReport, AuditedZone, BulkEnableFailure, BulkEnableOutcome, BulkEnableSuccess, SyncReport,
    ZoneBatchOutcome,
};
pub use zone::{Zone, ZoneAnalytics};

// Re-export provider 库的公共类型
pub use zone_mirror_provider::{
    AnalyticsSummary, ApiCredentials, CredentialValidationError, DnssecStatus, FetchOutcome,
    ProviderDnsRecord, ProviderZone, ZoneStatus,
};
