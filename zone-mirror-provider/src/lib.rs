//! # zone-mirror-provider
//!
//! Remote zone inventory client for the zone-mirror cache.
//!
//! Wraps the Cloudflare v4 API behind the provider-agnostic [`ZoneProvider`]
//! trait: paginated collection fetches (zones, per-zone DNS records),
//! per-zone DNSSEC reads/writes, and GraphQL traffic summaries.
//!
//! ## Fetch semantics
//!
//! Collection fetches walk every page the provider reports (bounded by a
//! hard page cap) and **fail soft**: a failed page logs, stops paging, and
//! returns the accumulated prefix with [`FetchOutcome::complete`]` == false`.
//! Callers must treat a short result as *possibly incomplete* rather than
//! "the remote has no more data". Per-resource operations return `Result`
//! and are expected to be caught close to the call site.
//!
//! No operation retries automatically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zone_mirror_provider::{ApiCredentials, CloudflareProvider, ZoneProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Construction fails fast on missing credentials.
//!     let credentials = ApiCredentials::new("admin@example.com", "api-key")?;
//!     let provider = CloudflareProvider::new(credentials);
//!
//!     let zones = provider.fetch_zones().await;
//!     for zone in &zones.items {
//!         println!("{} ({})", zone.name, zone.status);
//!     }
//!     if !zones.complete {
//!         eprintln!("warning: zone list may be incomplete");
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait only (internal traits are not exported)
pub use traits::ZoneProvider;

// Re-export types
pub use types::{
    AnalyticsSummary, ApiCredentials, CredentialValidationError, DnssecStatus, FetchOutcome,
    ProviderDnsRecord, ProviderZone, ZoneStatus,
};

// Re-export utils module
pub use utils::datetime;

// Re-export concrete provider
pub use providers::CloudflareProvider;
