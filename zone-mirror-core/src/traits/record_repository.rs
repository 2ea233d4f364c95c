//! DNS record persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DnsRecord;

/// DNS record cache repository Trait
///
/// All operations are scoped to one zone; a per-zone reconciliation pass
/// must never delete or orphan records belonging to other zones.
#[async_trait]
pub trait DnsRecordRepository: Send + Sync {
    /// Get all cached records for a zone
    async fn find_by_zone(&self, zone_id: &str) -> CoreResult<Vec<DnsRecord>>;

    /// Get all cached record ids for a zone (for diffing)
    async fn record_ids(&self, zone_id: &str) -> CoreResult<Vec<String>>;

    /// Insert-or-update a record row by primary key
    async fn upsert(&self, record: &DnsRecord) -> CoreResult<()>;

    /// Delete every record of `zone_id` whose id is absent from `keep`,
    /// returning the number of rows removed.
    async fn delete_not_in(&self, zone_id: &str, keep: &[String]) -> CoreResult<u64>;
}
