//! 测试辅助：内存仓库与脚本化 Mock Provider

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::Notify;

use zone_mirror_provider::{
    AnalyticsSummary, DnssecStatus, FetchOutcome, ProviderDnsRecord, ProviderError, ProviderZone,
    Result as ProviderResult, ZoneProvider, ZoneStatus,
};

use crate::error::{CoreError, CoreResult};
use crate::traits::{DnsRecordRepository, ZoneRepository};
use crate::types::{DnsRecord, Zone};

// ============ Payload helpers ============

pub(crate) fn provider_zone(id: &str, name: &str) -> ProviderZone {
    ProviderZone {
        id: id.to_string(),
        name: name.to_string(),
        status: ZoneStatus::Active,
        zone_type: "full".to_string(),
        plan_name: "Free Website".to_string(),
        name_servers: vec![
            "ana.ns.cloudflare.com".to_string(),
            "bob.ns.cloudflare.com".to_string(),
        ],
        original_name_servers: vec!["ns1.registrar.example".to_string()],
        created_on: "2023-01-01T00:00:00Z".to_string(),
        modified_on: "2024-01-01T00:00:00Z".to_string(),
        account_id: "acc-1".to_string(),
        account_name: "Example Corp".to_string(),
        owner_email: "admin@example.com".to_string(),
        activated_on: "2023-01-02T00:00:00Z".to_string(),
    }
}

pub(crate) fn provider_record(
    id: &str,
    zone_id: &str,
    record_type: &str,
    content: &str,
) -> ProviderDnsRecord {
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

// ============ In-memory repositories ============

/// `ZoneRepository` backed by a `HashMap`, mirroring the store contract:
/// upserts refresh `last_updated` and preserve analytics/DNSSEC columns.
pub(crate) struct InMemoryZoneRepository {
    zones: Mutex<HashMap<String, Zone>>,
}

impl InMemoryZoneRepository {
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a row directly, bypassing the trait (test setup).
    pub fn seed(&self, payload: ProviderZone) {
        if let Ok(mut zone) = Zone::from_provider(payload) {
            zone.last_updated = Some(Utc::now());
            self.zones.lock().insert(zone.id.clone(), zone);
        }
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.zones.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn get(&self, id: &str) -> Option<Zone> {
        self.zones.lock().get(id).cloned()
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneRepository {
    async fn find_all(&self) -> CoreResult<Vec<Zone>> {
        let mut zones: Vec<Zone> = self.zones.lock().values().cloned().collect();
        zones.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(zones)
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Zone>> {
        Ok(self.zones.lock().get(id).cloned())
    }

    async fn zone_ids(&self) -> CoreResult<Vec<String>> {
        Ok(self.ids())
    }

    async fn upsert(&self, zone: &Zone) -> CoreResult<()> {
        let mut zones = self.zones.lock();
        let mut row = zone.clone();
        row.last_updated = Some(Utc::now());
        if let Some(existing) = zones.get(&zone.id) {
            row.analytics = existing.analytics.clone();
            row.dnssec_status = existing.dnssec_status;
        }
        zones.insert(zone.id.clone(), row);
        Ok(())
    }

    async fn delete_not_in(&self, keep: &[String]) -> CoreResult<u64> {
        let keep: HashSet<&String> = keep.iter().collect();
        let mut zones = self.zones.lock();
        let before = zones.len();
        zones.retain(|id, _| keep.contains(id));
        Ok((before - zones.len()) as u64)
    }

    async fn update_analytics(&self, id: &str, summary: &AnalyticsSummary) -> CoreResult<()> {
        let mut zones = self.zones.lock();
        let zone = zones
            .get_mut(id)
            .ok_or_else(|| CoreError::ZoneNotFound(id.to_string()))?;
        zone.analytics.requests = summary.requests;
        zone.analytics.bandwidth = summary.bandwidth;
        zone.analytics.threats = summary.threats;
        zone.analytics.updated_at = summary.observed_at;
        Ok(())
    }

    async fn update_dnssec_status(&self, id: &str, status: DnssecStatus) -> CoreResult<()> {
        let mut zones = self.zones.lock();
        let zone = zones
            .get_mut(id)
            .ok_or_else(|| CoreError::ZoneNotFound(id.to_string()))?;
        zone.dnssec_status = Some(status);
        Ok(())
    }

    async fn touch_stale(&self, staleness: Duration) -> CoreResult<u64> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(staleness)
                .map_err(|e| CoreError::ValidationError(e.to_string()))?;
        let mut touched = 0;
        for zone in self.zones.lock().values_mut() {
            if zone.last_updated.is_none_or(|stamp| stamp < cutoff) {
                zone.last_updated = Some(Utc::now());
                touched += 1;
            }
        }
        Ok(touched)
    }
}

/// `DnsRecordRepository` backed by a `HashMap`.
pub(crate) struct InMemoryRecordRepository {
    records: Mutex<HashMap<String, DnsRecord>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn ids_for(&self, zone_id: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .records
            .lock()
            .values()
            .filter(|r| r.zone_id == zone_id)
            .map(|r| r.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl DnsRecordRepository for InMemoryRecordRepository {
    async fn find_by_zone(&self, zone_id: &str) -> CoreResult<Vec<DnsRecord>> {
        let mut records: Vec<DnsRecord> = self
            .records
            .lock()
            .values()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    async fn record_ids(&self, zone_id: &str) -> CoreResult<Vec<String>> {
        Ok(self.ids_for(zone_id))
    }

    async fn upsert(&self, record: &DnsRecord) -> CoreResult<()> {
        self.records
            .lock()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete_not_in(&self, zone_id: &str, keep: &[String]) -> CoreResult<u64> {
        let keep: HashSet<&String> = keep.iter().collect();
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|id, record| record.zone_id != zone_id || keep.contains(id));
        Ok((before - records.len()) as u64)
    }
}

// ============ Mock provider ============

type RecordsHook = Box<dyn Fn(&str) + Send + Sync>;

/// Scripted `ZoneProvider` for service tests.
///
/// Defaults: no zones, no records, DNSSEC disabled everywhere, analytics
/// returning fixed nonzero counters.
pub(crate) struct MockProvider {
    zones: Mutex<FetchOutcome<ProviderZone>>,
    records: Mutex<HashMap<String, FetchOutcome<ProviderDnsRecord>>>,
    dnssec: Mutex<HashMap<String, DnssecStatus>>,
    dnssec_fail: Mutex<HashSet<String>>,
    set_dnssec_fail: Mutex<HashSet<String>>,
    analytics_fail: Mutex<HashSet<String>>,
    records_hook: Mutex<Option<RecordsHook>>,
    zone_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(FetchOutcome::complete(vec![])),
            records: Mutex::new(HashMap::new()),
            dnssec: Mutex::new(HashMap::new()),
            dnssec_fail: Mutex::new(HashSet::new()),
            set_dnssec_fail: Mutex::new(HashSet::new()),
            analytics_fail: Mutex::new(HashSet::new()),
            records_hook: Mutex::new(None),
            zone_gate: Mutex::new(None),
        }
    }

    pub fn set_zones(&self, outcome: FetchOutcome<ProviderZone>) {
        *self.zones.lock() = outcome;
    }

    pub fn set_records(&self, zone_id: &str, outcome: FetchOutcome<ProviderDnsRecord>) {
        self.records.lock().insert(zone_id.to_string(), outcome);
    }

    pub fn set_dnssec_status(&self, zone_id: &str, status: DnssecStatus) {
        self.dnssec.lock().insert(zone_id.to_string(), status);
    }

    pub fn fail_dnssec_status(&self, zone_id: &str) {
        self.dnssec_fail.lock().insert(zone_id.to_string());
    }

    pub fn fail_set_dnssec(&self, zone_id: &str) {
        self.set_dnssec_fail.lock().insert(zone_id.to_string());
    }

    pub fn fail_analytics(&self, zone_id: &str) {
        self.analytics_fail.lock().insert(zone_id.to_string());
    }

    /// Run `hook` at the start of every record fetch (e.g., to flip a
    /// cancellation token mid-run).
    pub fn set_fetch_records_hook(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.records_hook.lock() = Some(Box::new(hook));
    }

    /// Make the next zone fetch block until the returned handle is
    /// notified, so tests can hold a run open.
    pub fn gate_zone_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.zone_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    fn network_error(&self, detail: &str) -> ProviderError {
        ProviderError::NetworkError {
            provider: "mock".to_string(),
            detail: detail.to_string(),
        }
    }
}

#[async_trait]
impl ZoneProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> ProviderResult<bool> {
        Ok(true)
    }

    async fn fetch_zones(&self) -> FetchOutcome<ProviderZone> {
        let gate = self.zone_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.zones.lock().clone()
    }

    async fn fetch_records(&self, zone_id: &str) -> FetchOutcome<ProviderDnsRecord> {
        if let Some(hook) = self.records_hook.lock().as_ref() {
            hook(zone_id);
        }
        self.records
            .lock()
            .get(zone_id)
            .cloned()
            .unwrap_or_else(|| FetchOutcome::complete(vec![]))
    }

    async fn dnssec_status(&self, zone_id: &str) -> ProviderResult<DnssecStatus> {
        if self.dnssec_fail.lock().contains(zone_id) {
            return Err(self.network_error("dnssec lookup failed"));
        }
        Ok(self
            .dnssec
            .lock()
            .get(zone_id)
            .copied()
            .unwrap_or(DnssecStatus::Disabled))
    }

    async fn set_dnssec_status(
        &self,
        zone_id: &str,
        status: DnssecStatus,
    ) -> ProviderResult<DnssecStatus> {
        if self.set_dnssec_fail.lock().contains(zone_id) {
            return Err(self.network_error("dnssec update failed"));
        }
        self.dnssec.lock().insert(zone_id.to_string(), status);
        Ok(status)
    }

    async fn zone_analytics(
        &self,
        zone_id: &str,
        _window_days: u32,
    ) -> ProviderResult<AnalyticsSummary> {
        if self.analytics_fail.lock().contains(zone_id) {
            return Err(self.network_error("analytics query failed"));
        }
        Ok(AnalyticsSummary {
            requests: 1200,
            bandwidth: 5_000_000,
            threats: 3,
            observed_at: Some(Utc::now()),
        })
    }
}
