//! 同步/审计进度追踪与协作式取消
//!
//! Each long-running run kind owns one tracker instance: a single-slot,
//! single-writer/multiple-reader state record. The writer is the run itself;
//! any number of concurrent pollers read snapshots without blocking it.
//! `begin()` is the check-and-set that enforces "at most one active run" —
//! a second trigger is rejected with a conflict error, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

// ============ Cancellation ============

/// Cooperative cancellation flag for a synchronization run.
///
/// Cloneable handle around a shared flag. The reconciler polls it between
/// zone iterations only — mid-zone work is not interruptible, so at most one
/// zone's worth of work runs after [`cancel()`](Self::cancel) is observed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag (done at the start of every run).
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// ============ Sync progress ============

/// Snapshot of the in-flight (or most recent) synchronization run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProgress {
    /// Whether a run is currently active.
    pub syncing: bool,
    /// Free-text label for the current phase.
    pub current_phase: String,
    /// Zones fully processed so far.
    pub zones_processed: usize,
    /// Total zones in this run.
    pub total_zones: usize,
    /// Name of the zone currently being processed.
    pub current_zone: String,
    /// When the run started; `None` before the first run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Seconds since the run started, computed at snapshot time.
    pub elapsed_seconds: u64,
}

/// Single-slot progress state for the reconciler.
pub struct SyncTracker {
    inner: RwLock<SyncProgress>,
}

impl SyncTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SyncProgress::default()),
        }
    }

    /// Claim the slot for a new run.
    ///
    /// Resets all counters and marks the run active.
    ///
    /// # Errors
    /// Returns [`CoreError::SyncInProgress`] if a run is already active;
    /// the existing progress state is left untouched.
    pub fn begin(&self, initial_phase: &str) -> CoreResult<()> {
        let mut progress = self.inner.write();
        if progress.syncing {
            return Err(CoreError::SyncInProgress);
        }
        *progress = SyncProgress {
            syncing: true,
            current_phase: initial_phase.to_string(),
            started_at: Some(Utc::now()),
            ..SyncProgress::default()
        };
        Ok(())
    }

    pub fn set_phase(&self, phase: &str) {
        self.inner.write().current_phase = phase.to_string();
    }

    pub fn set_total(&self, total: usize) {
        self.inner.write().total_zones = total;
    }

    /// Record that processing of zone `index` (0-based) has started.
    pub fn zone_started(&self, index: usize, name: &str) {
        let mut progress = self.inner.write();
        progress.zones_processed = index;
        progress.current_zone = name.to_string();
    }

    /// Record the number of fully processed zones.
    pub fn set_processed(&self, processed: usize) {
        self.inner.write().zones_processed = processed;
    }

    /// Mark the run inactive, optionally with a final phase label.
    pub fn finish(&self, final_phase: Option<&str>) {
        let mut progress = self.inner.write();
        progress.syncing = false;
        if let Some(phase) = final_phase {
            progress.current_phase = phase.to_string();
        }
    }

    /// Whether a run is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.read().syncing
    }

    /// Point-in-time copy for pollers, with elapsed seconds filled in.
    #[must_use]
    pub fn snapshot(&self) -> SyncProgress {
        let mut progress = self.inner.read().clone();
        if progress.syncing {
            if let Some(started_at) = progress.started_at {
                progress.elapsed_seconds =
                    u64::try_from((Utc::now() - started_at).num_seconds().max(0)).unwrap_or(0);
            }
        }
        progress
    }
}

impl Default for SyncTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ============ Audit progress ============

/// Snapshot of the in-flight (or most recent) security audit run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditProgress {
    /// Whether an audit is currently active.
    pub checking: bool,
    /// Zones checked so far.
    pub processed: usize,
    /// Total zones to check.
    pub total: usize,
    /// Zones found without the security feature enabled.
    pub without_security: usize,
    /// Name of the zone currently being checked.
    pub current_zone: String,
    /// When the audit started; `None` before the first run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Seconds since the audit started, computed at snapshot time.
    pub elapsed_seconds: u64,
}

/// Single-slot progress state for the security audit, same pattern as
/// [`SyncTracker`] but independent — the two run kinds never share state.
pub struct AuditTracker {
    inner: RwLock<AuditProgress>,
}

impl AuditTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AuditProgress::default()),
        }
    }

    /// Claim the slot for a new audit.
    ///
    /// # Errors
    /// Returns [`CoreError::AuditInProgress`] if an audit is already active.
    pub fn begin(&self) -> CoreResult<()> {
        let mut progress = self.inner.write();
        if progress.checking {
            return Err(CoreError::AuditInProgress);
        }
        *progress = AuditProgress {
            checking: true,
            started_at: Some(Utc::now()),
            ..AuditProgress::default()
        };
        Ok(())
    }

    pub fn set_total(&self, total: usize) {
        self.inner.write().total = total;
    }

    pub fn zone_started(&self, name: &str) {
        self.inner.write().current_zone = name.to_string();
    }

    /// Record one checked zone, optionally counting it as insecure.
    pub fn zone_checked(&self, insecure: bool) -> usize {
        let mut progress = self.inner.write();
        progress.processed += 1;
        if insecure {
            progress.without_security += 1;
        }
        progress.processed
    }

    pub fn finish(&self) {
        self.inner.write().checking = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.read().checking
    }

    /// Point-in-time copy for pollers, with elapsed seconds filled in.
    #[must_use]
    pub fn snapshot(&self) -> AuditProgress {
        let mut progress = self.inner.read().clone();
        if progress.checking {
            if let Some(started_at) = progress.started_at {
                progress.elapsed_seconds =
                    u64::try_from((Utc::now() - started_at).num_seconds().max(0)).unwrap_or(0);
            }
        }
        progress
    }
}

impl Default for AuditTracker {
    fn default() -> Self {
        Self::new()
    }
}
