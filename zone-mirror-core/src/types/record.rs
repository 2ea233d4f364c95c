//! DNS record cache-row type definitions

use serde::{Deserialize, Serialize};

use zone_mirror_provider::{ProviderDnsRecord, datetime};

use crate::error::{CoreError, CoreResult};

/// A DNS record as cached locally, scoped to exactly one zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Remote-assigned record identifier (primary key).
    pub id: String,
    /// Owning zone's identifier (foreign key, cascading delete).
    pub zone_id: String,
    /// Record type string (`"A"`, `"MX"`, ...).
    pub record_type: String,
    /// Fully qualified record name.
    pub name: String,
    /// Record content/value.
    pub content: String,
    /// Time to live in seconds; `1` means "automatic".
    pub ttl: u32,
    /// Whether the provider's CDN proxy is enabled.
    pub proxied: bool,
    /// Remote creation timestamp, converted to the display timezone at
    /// write time.
    pub created_on: String,
    /// Remote modification timestamp, converted to the display timezone at
    /// write time.
    pub modified_on: String,
    /// Priority for MX/SRV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecord {
    /// Build a cache row from a provider payload.
    ///
    /// The two remote timestamps are converted to the fixed display
    /// timezone here, once, so everything downstream sees display strings.
    ///
    /// # Errors
    /// Returns [`CoreError::ValidationError`] when the payload carries no
    /// record id — such rows are skipped and counted by the reconciler.
    pub fn from_provider(record: ProviderDnsRecord) -> CoreResult<Self> {
        if record.id.is_empty() {
            return Err(CoreError::ValidationError(
                "DNS record payload is missing an id".to_string(),
            ));
        }

        Ok(Self {
            id: record.id,
            zone_id: record.zone_id,
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            ttl: record.ttl,
            proxied: record.proxied,
            created_on: datetime::to_display_time(record.created_on.as_deref().unwrap_or("")),
            modified_on: datetime::to_display_time(record.modified_on.as_deref().unwrap_or("")),
            priority: record.priority,
        })
    }
}
