#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end tests for the reconciliation engine: a scripted provider
//! driving the core services against a real `SqliteStore`.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use zone_mirror_app::{AppState, AppStateBuilder, SqliteStore};
use zone_mirror_core::error::CoreError;
use zone_mirror_core::traits::{DnsRecordRepository, ZoneRepository};
use zone_mirror_provider::{
    AnalyticsSummary, DnssecStatus, FetchOutcome, ProviderDnsRecord, ProviderError, ProviderZone,
    Result as ProviderResult, ZoneProvider, ZoneStatus,
};

// ===== Scripted provider =====

type RecordsHook = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct ScriptedProvider {
    zones: Mutex<Vec<(Vec<ProviderZone>, bool)>>,
    records: Mutex<HashMap<String, (Vec<ProviderDnsRecord>, bool)>>,
    dnssec: Mutex<HashMap<String, DnssecStatus>>,
    set_dnssec_fail: Mutex<HashSet<String>>,
    records_hook: Mutex<Option<RecordsHook>>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self::default()
    }

    /// Queue one zone fetch result; the last queued result repeats.
    fn push_zones(&self, zones: Vec<ProviderZone>, complete: bool) {
        self.zones.lock().unwrap().push((zones, complete));
    }

    fn set_records(&self, zone_id: &str, records: Vec<ProviderDnsRecord>, complete: bool) {
        self.records
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), (records, complete));
    }

    fn set_dnssec(&self, zone_id: &str, status: DnssecStatus) {
        self.dnssec
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), status);
    }

    fn fail_set_dnssec(&self, zone_id: &str) {
        self.set_dnssec_fail
            .lock()
            .unwrap()
            .insert(zone_id.to_string());
    }

    fn set_fetch_records_hook(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.records_hook.lock().unwrap() = Some(Box::new(hook));
    }
}

#[async_trait]
impl ZoneProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn validate_credentials(&self) -> ProviderResult<bool> {
        Ok(true)
    }

    async fn fetch_zones(&self) -> FetchOutcome<ProviderZone> {
        let mut queue = self.zones.lock().unwrap();
        let (items, complete) = if queue.len() > 1 {
            queue.remove(0)
        } else {
            queue.first().cloned().unwrap_or((vec![], true))
        };
        FetchOutcome { items, complete }
    }

    async fn fetch_records(&self, zone_id: &str) -> FetchOutcome<ProviderDnsRecord> {
        if let Some(hook) = self.records_hook.lock().unwrap().as_ref() {
            hook(zone_id);
        }
        let (items, complete) = self
            .records
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or((vec![], true));
        FetchOutcome { items, complete }
    }

    async fn dnssec_status(&self, zone_id: &str) -> ProviderResult<DnssecStatus> {
        Ok(self
            .dnssec
            .lock()
            .unwrap()
            .get(zone_id)
            .copied()
            .unwrap_or(DnssecStatus::Disabled))
    }

    async fn set_dnssec_status(
        &self,
        zone_id: &str,
        status: DnssecStatus,
    ) -> ProviderResult<DnssecStatus> {
        if self.set_dnssec_fail.lock().unwrap().contains(zone_id) {
            return Err(ProviderError::PermissionDenied {
                provider: "scripted".to_string(),
                raw_message: Some("zone is locked".to_string()),
            });
        }
        self.dnssec
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), status);
        Ok(status)
    }

    async fn zone_analytics(
        &self,
        _zone_id: &str,
        _window_days: u32,
    ) -> ProviderResult<AnalyticsSummary> {
        Ok(AnalyticsSummary {
            requests: 1200,
            bandwidth: 5_000_000,
            threats: 3,
            observed_at: Some(chrono::Utc::now()),
        })
    }
}

// ===== Helpers =====

fn zone(id: &str, name: &str) -> ProviderZone {
    ProviderZone {
        id: id.to_string(),
        name: name.to_string(),
        status: ZoneStatus::Active,
        zone_type: "full".to_string(),
        plan_name: "Free Website".to_string(),
        name_servers: vec!["ana.ns.cloudflare.com".to_string()],
        original_name_servers: vec![],
        created_on: "2023-01-01T00:00:00Z".to_string(),
        modified_on: "2024-01-01T00:00:00Z".to_string(),
        account_id: "acc-1".to_string(),
        account_name: "Example Corp".to_string(),
        owner_email: "admin@example.com".to_string(),
        activated_on: String::new(),
    }
}

fn record(id: &str, zone_id: &str, record_type: &str, content: &str) -> ProviderDnsRecord {
    ProviderDnsRecord {
        id: id.to_string(),
        zone_id: zone_id.to_string(),
        record_type: record_type.to_string(),
        name: "www.example.com".to_string(),
        content: content.to_string(),
        ttl: 300,
        proxied: false,
        priority: None,
        created_on: Some("2024-01-15T12:00:00Z".to_string()),
        modified_on: Some("2024-02-20T08:30:00Z".to_string()),
    }
}

async fn build_app(
    provider: Arc<ScriptedProvider>,
) -> (AppState, Arc<SqliteStore>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = Arc::new(
        SqliteStore::new(&tmp.path().join("test.db"))
            .await
            .expect("failed to create SqliteStore"),
    );
    let app = AppStateBuilder::new()
        .sqlite_store(Arc::clone(&store))
        .provider(provider as Arc<dyn ZoneProvider>)
        .build()
        .expect("failed to build AppState");
    (app, store, tmp)
}

// ===== Full-run behavior =====

#[tokio::test]
async fn full_sync_populates_zones_records_analytics_and_dnssec() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(vec![zone("zone-a", "a.com"), zone("zone-b", "b.com")], true);
    provider.set_records(
        "zone-a",
        vec![
            record("rec-1", "zone-a", "A", "1.2.3.4"),
            record("rec-2", "zone-a", "MX", "mail.a.com"),
        ],
        true,
    );
    provider.set_dnssec("zone-a", DnssecStatus::Active);

    let (app, store, _tmp) = build_app(provider).await;

    let report = app.sync_service.sync_all_zones().await.unwrap();
    assert!(report.success);
    assert_eq!(report.total_zones, 2);
    assert_eq!(report.zones_synced, 2);
    assert_eq!(report.zones_failed, 0);
    assert_eq!(report.zone_batch.upserted, 2);
    assert_eq!(report.records_upserted, 2);
    assert_eq!(report.dnssec_checked, 2);

    let zone_a = ZoneRepository::find_by_id(store.as_ref(), "zone-a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zone_a.name, "a.com");
    assert_eq!(zone_a.dnssec_status, Some(DnssecStatus::Active));
    assert_eq!(zone_a.analytics.requests, 1200);
    assert!(zone_a.last_updated.is_some());

    let records = DnsRecordRepository::find_by_zone(store.as_ref(), "zone-a")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    // Remote RFC3339 timestamps are stored in display form
    assert!(records.iter().all(|r| r.created_on == "01/15/24 08:00 AM"));

    let progress = app.sync_service.progress();
    assert!(!progress.syncing);
    assert_eq!(progress.zones_processed, 2);
}

#[tokio::test]
async fn repeated_sync_with_unchanged_remote_is_idempotent() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(vec![zone("zone-a", "a.com")], true);
    provider.set_records("zone-a", vec![record("rec-1", "zone-a", "A", "1.2.3.4")], true);

    let (app, store, _tmp) = build_app(provider).await;

    let first = app.sync_service.sync_all_zones().await.unwrap();
    assert!(first.success);

    let second = app.sync_service.sync_all_zones().await.unwrap();
    assert!(second.success);
    assert_eq!(second.zone_batch.deleted, 0);
    assert_eq!(second.records_deleted, 0);

    let zones = ZoneRepository::find_all(store.as_ref()).await.unwrap();
    assert_eq!(zones.len(), 1);
    let records = DnsRecordRepository::find_by_zone(store.as_ref(), "zone-a")
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn zones_missing_from_remote_are_deleted_with_their_records() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(vec![zone("zone-a", "a.com"), zone("zone-b", "b.com")], true);
    provider.push_zones(vec![zone("zone-a", "a.com")], true);
    provider.set_records("zone-b", vec![record("rec-1", "zone-b", "A", "5.6.7.8")], true);

    let (app, store, _tmp) = build_app(provider).await;

    let first = app.sync_service.sync_all_zones().await.unwrap();
    assert!(first.success);
    assert_eq!(
        DnsRecordRepository::record_ids(store.as_ref(), "zone-b")
            .await
            .unwrap()
            .len(),
        1
    );

    let second = app.sync_service.sync_all_zones().await.unwrap();
    assert_eq!(second.zone_batch.deleted, 1);

    let mut ids = ZoneRepository::zone_ids(store.as_ref()).await.unwrap();
    ids.sort();
    assert_eq!(ids, vec!["zone-a"]);
    // Cascade removed the deleted zone's records
    assert!(
        DnsRecordRepository::record_ids(store.as_ref(), "zone-b")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn empty_remote_fetch_never_wipes_the_cache() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(vec![zone("zone-a", "a.com")], true);
    provider.push_zones(vec![], false);

    let (app, store, _tmp) = build_app(provider).await;

    let first = app.sync_service.sync_all_zones().await.unwrap();
    assert!(first.success);

    let second = app.sync_service.sync_all_zones().await;
    assert!(matches!(second, Err(CoreError::EmptyZoneFetch)));

    // Existing rows are untouched and the tracker is released
    assert_eq!(
        ZoneRepository::zone_ids(store.as_ref()).await.unwrap(),
        vec!["zone-a"]
    );
    assert!(!app.sync_service.progress().syncing);
}

#[tokio::test]
async fn truncated_remote_fetch_skips_deletions() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(vec![zone("zone-a", "a.com"), zone("zone-b", "b.com")], true);
    provider.push_zones(vec![zone("zone-a", "a.com")], false);

    let (app, store, _tmp) = build_app(provider).await;

    let first = app.sync_service.sync_all_zones().await.unwrap();
    assert!(first.success);

    let second = app.sync_service.sync_all_zones().await.unwrap();
    assert!(!second.success);
    assert!(!second.zone_batch.deletions_applied);

    // The zone absent from the truncated fetch must survive
    let mut ids = ZoneRepository::zone_ids(store.as_ref()).await.unwrap();
    ids.sort();
    assert_eq!(ids, vec!["zone-a", "zone-b"]);
}

#[tokio::test]
async fn cancellation_commits_prior_zones_and_stops() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(
        vec![
            zone("zone-a", "a.com"),
            zone("zone-b", "b.com"),
            zone("zone-c", "c.com"),
        ],
        true,
    );
    provider.set_records("zone-a", vec![record("rec-1", "zone-a", "A", "1.2.3.4")], true);
    provider.set_records("zone-b", vec![record("rec-2", "zone-b", "A", "5.6.7.8")], true);

    let (app, store, _tmp) = build_app(Arc::clone(&provider)).await;

    let token = app.sync_service.cancellation_token();
    provider.set_fetch_records_hook(move |_| token.cancel());

    let report = app.sync_service.sync_all_zones().await.unwrap();
    assert!(report.cancelled);
    assert!(!report.success);

    // Zone A was fully processed and stays committed; B and C were never entered
    assert_eq!(
        DnsRecordRepository::record_ids(store.as_ref(), "zone-a")
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(
        DnsRecordRepository::record_ids(store.as_ref(), "zone-b")
            .await
            .unwrap()
            .is_empty()
    );
    assert!(!app.sync_service.progress().syncing);
}

// ===== Audit and bulk enablement =====

#[tokio::test]
async fn audit_flags_zones_without_dnssec() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(vec![zone("zone-a", "a.com"), zone("zone-b", "b.com")], true);
    provider.set_dnssec("zone-a", DnssecStatus::Active);
    provider.set_dnssec("zone-b", DnssecStatus::Disabled);
    provider.set_records(
        "zone-b",
        vec![record("rec-1", "zone-b", "TXT", "v=spf1 -all")],
        true,
    );

    let (app, _store, _tmp) = build_app(provider).await;

    app.sync_service.sync_all_zones().await.unwrap();

    let report = app.audit_service.find_insecure_zones().await.unwrap();
    assert_eq!(report.total_checked, 2);
    assert_eq!(report.without_security, 1);
    assert_eq!(report.zones[0].zone.id, "zone-b");
    assert_eq!(
        report.zones[0].posture.recommendation.to_string(),
        "Highly Recommended"
    );
    assert!(!app.audit_service.progress().checking);
}

#[tokio::test]
async fn bulk_enable_reports_structured_tally() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_zones(
        vec![
            zone("zone-x", "x.com"),
            zone("zone-y", "y.com"),
            zone("zone-z", "z.com"),
        ],
        true,
    );
    provider.fail_set_dnssec("zone-y");

    let (app, _store, _tmp) = build_app(provider).await;
    app.sync_service.sync_all_zones().await.unwrap();

    let outcome = app
        .dnssec_service
        .enable_for_zones(&[
            "zone-x".to_string(),
            "zone-y".to_string(),
            "zone-z".to_string(),
        ])
        .await;

    assert_eq!(outcome.total, 3);
    let mut enabled: Vec<&str> = outcome.enabled.iter().map(|s| s.zone_id.as_str()).collect();
    enabled.sort_unstable();
    assert_eq!(enabled, vec!["zone-x", "zone-z"]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].zone_id, "zone-y");
    assert_eq!(outcome.failed[0].name, "y.com");
    assert!(outcome.failed[0].reason.contains("locked"));
}

// ===== Bootstrap validation =====

#[tokio::test]
async fn app_state_requires_a_provider() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = Arc::new(
        SqliteStore::new(&tmp.path().join("test.db"))
            .await
            .expect("failed to create SqliteStore"),
    );

    let result = AppStateBuilder::new().sqlite_store(store).build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}
