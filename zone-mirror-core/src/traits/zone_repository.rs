//! Zone persistence abstract Trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{AnalyticsSummary, DnssecStatus, Zone};

/// Zone cache repository Trait
///
/// Backed by a relational store keyed on the remote-assigned zone id.
/// Access is short-lived and per-operation; no implementation may hold a
/// lock or transaction across a caller's network call.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Get all cached zones
    async fn find_all(&self) -> CoreResult<Vec<Zone>>;

    /// Get one zone by id
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Zone>>;

    /// Get all cached zone ids (for diffing)
    async fn zone_ids(&self) -> CoreResult<Vec<String>>;

    /// Insert-or-update a zone row by primary key.
    ///
    /// Refreshes the row's `last_updated` stamp on every touch. Does not
    /// overwrite the analytics or DNSSEC columns — those have dedicated
    /// writers below.
    async fn upsert(&self, zone: &Zone) -> CoreResult<()>;

    /// Delete every zone whose id is absent from `keep`, returning the
    /// number of rows removed. Deleting a zone cascades to its DNS records.
    async fn delete_not_in(&self, keep: &[String]) -> CoreResult<u64>;

    /// Write the four analytics columns (plus observed-at) for a zone.
    async fn update_analytics(&self, id: &str, summary: &AnalyticsSummary) -> CoreResult<()>;

    /// Write the DNSSEC status column for a zone.
    async fn update_dnssec_status(&self, id: &str, status: DnssecStatus) -> CoreResult<()>;

    /// Stamp `last_updated = now` on every zone whose stamp is missing or
    /// older than `staleness`, returning the number of rows touched.
    async fn touch_stale(&self, staleness: Duration) -> CoreResult<u64>;
}
