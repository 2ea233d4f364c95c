//! Zone cache-row type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zone_mirror_provider::{DnssecStatus, ProviderZone, ZoneStatus};

use crate::error::{CoreError, CoreResult};

/// Per-zone traffic counters mirrored from the provider's analytics API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAnalytics {
    /// Total HTTP requests in the last analytics window.
    pub requests: u64,
    /// Total bytes served in the last analytics window.
    pub bandwidth: u64,
    /// Total threats mitigated in the last analytics window.
    pub threats: u64,
    /// When the counters were last observed; `None` until the first
    /// successful fetch (and after failed fetches).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A hosted zone as cached locally.
///
/// `id` is the remote-assigned identifier and the primary key; everything
/// else mirrors the provider's view of the zone plus locally maintained
/// enrichment columns (analytics, DNSSEC status, `last_updated`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Remote-assigned zone identifier (primary key).
    pub id: String,
    /// Zone name.
    pub name: String,
    /// Zone status.
    pub status: ZoneStatus,
    /// Zone type (e.g., `"full"`).
    pub zone_type: String,
    /// Billing plan name.
    pub plan_name: String,
    /// Name servers assigned by the provider.
    pub name_servers: Vec<String>,
    /// Name servers before onboarding.
    pub original_name_servers: Vec<String>,
    /// Remote creation timestamp (opaque string).
    pub created_on: String,
    /// Remote modification timestamp (opaque string).
    pub modified_on: String,
    /// Owning account identifier.
    pub account_id: String,
    /// Owning account display name.
    pub account_name: String,
    /// Owner contact email.
    pub owner_email: String,
    /// Remote activation timestamp (opaque string).
    pub activated_on: String,
    /// Mirrored traffic counters.
    pub analytics: ZoneAnalytics,
    /// Last known DNSSEC status; `None` until the first check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_status: Option<DnssecStatus>,
    /// Local write timestamp, refreshed on every touch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Zone {
    /// Build a cache row from a provider payload.
    ///
    /// Enrichment fields (analytics, DNSSEC, `last_updated`) start empty;
    /// they have their own writers.
    ///
    /// # Errors
    /// Returns [`CoreError::ValidationError`] when the payload carries no
    /// zone id — such rows are skipped and counted by the reconciler.
    pub fn from_provider(zone: ProviderZone) -> CoreResult<Self> {
        if zone.id.is_empty() {
            return Err(CoreError::ValidationError(
                "zone payload is missing an id".to_string(),
            ));
        }

        Ok(Self {
            id: zone.id,
            name: zone.name,
            status: zone.status,
            zone_type: zone.zone_type,
            plan_name: zone.plan_name,
            name_servers: zone.name_servers,
            original_name_servers: zone.original_name_servers,
            created_on: zone.created_on,
            modified_on: zone.modified_on,
            account_id: zone.account_id,
            account_name: zone.account_name,
            owner_email: zone.owner_email,
            activated_on: zone.activated_on,
            analytics: ZoneAnalytics::default(),
            dnssec_status: None,
            last_updated: None,
        })
    }
}
