//! Zone Mirror Core Library
//!
//! Provides the reconciliation core for mirroring a DNS provider's zone and
//! record inventory into a local cache, including:
//! - Synchronization engine (Sync Service)
//! - Security posture analysis and audit (Security Audit Service)
//! - Bulk DNSSEC enablement (DNSSEC Service)
//!
//! This library is platform-independent: the storage layer is abstracted
//! through traits and injected by the hosting application, together with a
//! [`zone_mirror_provider::ZoneProvider`] implementation.

pub mod error;
pub mod posture;
pub mod progress;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use posture::{ActivityLevel, PostureAnalysis, SecurityRecommendation, analyze_records};
pub use progress::{AuditProgress, AuditTracker, CancelToken, SyncProgress, SyncTracker};
pub use services::{DnssecService, SecurityAuditService, ServiceContext, SyncService};
pub use traits::{DnsRecordRepository, ZoneRepository};
