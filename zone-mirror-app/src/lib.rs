//! Platform-agnostic application bootstrap for zone-mirror.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Frontends construct this once at startup, wiring a storage
//! adapter and a remote provider into the core services.

use std::sync::Arc;

use zone_mirror_core::error::{CoreError, CoreResult};
use zone_mirror_core::services::{DnssecService, SecurityAuditService, ServiceContext, SyncService};
use zone_mirror_core::traits::{DnsRecordRepository, ZoneRepository};
use zone_mirror_provider::ZoneProvider;

pub mod adapters;

pub use adapters::SqliteStore;

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs
/// this once at startup via [`AppStateBuilder`]. It is not constructible
/// without a provider, so no run can ever start on a partially configured
/// application.
pub struct AppState {
    /// Service context (holds storage adapters and the provider)
    pub ctx: Arc<ServiceContext>,
    /// Synchronization service (one run at a time)
    pub sync_service: Arc<SyncService>,
    /// Security audit service (one scan at a time)
    pub audit_service: Arc<SecurityAuditService>,
    /// Bulk DNSSEC enablement service
    pub dnssec_service: DnssecService,
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `zone_repository` — how cached zones are stored
/// - `record_repository` — how cached DNS records are stored
/// - `provider` — the remote zone inventory client
pub struct AppStateBuilder {
    zone_repository: Option<Arc<dyn ZoneRepository>>,
    record_repository: Option<Arc<dyn DnsRecordRepository>>,
    provider: Option<Arc<dyn ZoneProvider>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            zone_repository: None,
            record_repository: None,
            provider: None,
        }
    }

    #[must_use]
    pub fn zone_repository(mut self, repo: Arc<dyn ZoneRepository>) -> Self {
        self.zone_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn record_repository(mut self, repo: Arc<dyn DnsRecordRepository>) -> Self {
        self.record_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn ZoneProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use one [`SqliteStore`] for both storage adapters.
    #[must_use]
    pub fn sqlite_store(self, store: Arc<SqliteStore>) -> Self {
        self.zone_repository(Arc::clone(&store) as Arc<dyn ZoneRepository>)
            .record_repository(store as Arc<dyn DnsRecordRepository>)
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let zone_repository = self
            .zone_repository
            .ok_or_else(|| CoreError::ValidationError("zone_repository is required".to_string()))?;
        let record_repository = self.record_repository.ok_or_else(|| {
            CoreError::ValidationError("record_repository is required".to_string())
        })?;
        let provider = self
            .provider
            .ok_or_else(|| CoreError::ValidationError("provider is required".to_string()))?;

        let ctx = Arc::new(ServiceContext::new(
            zone_repository,
            record_repository,
            provider,
        ));

        let sync_service = Arc::new(SyncService::new(Arc::clone(&ctx)));
        let audit_service = Arc::new(SecurityAuditService::new(Arc::clone(&ctx)));
        let dnssec_service = DnssecService::new(Arc::clone(&ctx));

        Ok(AppState {
            ctx,
            sync_service,
            audit_service,
            dnssec_service,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
