//! Run outcome report types
//!
//! Every long-running operation reports a structured tally rather than a
//! bare pass/fail: partial failure is always visible as a nonzero failed
//! count, never silently folded into an overall "success".

use serde::Serialize;

use crate::posture::PostureAnalysis;
use crate::types::Zone;

// ============ Synchronization ============

/// Outcome of the zone-batch phase of a run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBatchOutcome {
    /// Zone rows inserted or updated.
    pub upserted: usize,
    /// Stale zone rows deleted (cascades to their DNS records).
    pub deleted: u64,
    /// Zone payloads skipped over mapping or row-level errors.
    pub skipped: usize,
    /// Whether the deletion step ran. `false` when the remote fetch was
    /// incomplete — deletions are never driven by a possibly-truncated
    /// live set.
    pub deletions_applied: bool,
}

/// Outcome of one full reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Net verdict: `true` iff the zone batch had zero errors and no zone
    /// failed its DNS/analytics reconciliation.
    pub success: bool,
    /// Whether the run stopped early on operator cancellation.
    pub cancelled: bool,
    /// Zones returned by the remote fetch.
    pub total_zones: usize,
    /// Zones whose per-zone reconciliation fully succeeded.
    pub zones_synced: usize,
    /// Zones whose per-zone reconciliation failed.
    pub zones_failed: usize,
    /// Zones whose DNSSEC status was successfully checked (best-effort,
    /// never part of the verdict).
    pub dnssec_checked: usize,
    /// Zone-batch phase tally.
    pub zone_batch: ZoneBatchOutcome,
    /// DNS record rows inserted or updated across all zones.
    pub records_upserted: usize,
    /// DNS record rows deleted across all zones.
    pub records_deleted: u64,
    /// DNS record payloads skipped over mapping or row-level errors.
    pub records_skipped: usize,
    /// Zones restamped during finalization.
    pub zones_touched: u64,
}

// ============ Bulk DNSSEC enablement ============

/// One zone successfully switched on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnableSuccess {
    /// Zone identifier.
    pub zone_id: String,
    /// Zone display name (cache-resolved, id when unknown).
    pub name: String,
}

/// One zone that could not be switched on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnableFailure {
    /// Zone identifier.
    pub zone_id: String,
    /// Zone display name (cache-resolved, id when unknown).
    pub name: String,
    /// Human-readable reason for the failure.
    pub reason: String,
}

/// Structured tally of a bulk enablement request.
///
/// One member's failure never aborts the rest.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnableOutcome {
    /// Zones successfully enabled.
    pub enabled: Vec<BulkEnableSuccess>,
    /// Zones that failed, with reasons.
    pub failed: Vec<BulkEnableFailure>,
    /// Total zones requested.
    pub total: usize,
}

// ============ Security audit ============

/// One audited zone flagged as lacking the security feature.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditedZone {
    /// The cached zone row.
    #[serde(flatten)]
    pub zone: Zone,
    /// Posture analysis of the zone's current record set.
    #[serde(flatten)]
    pub posture: PostureAnalysis,
}

/// Outcome of one security audit run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Zones without the security feature, with posture analysis.
    pub zones: Vec<AuditedZone>,
    /// Total zones checked.
    pub total_checked: usize,
    /// Count of zones without the security feature.
    pub without_security: usize,
}
