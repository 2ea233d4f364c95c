use serde::{Deserialize, Serialize};

// ============ Zone Types ============

/// Status of a zone within the remote provider.
///
/// Serialized as lowercase strings. Unrecognized remote statuses are mapped
/// to [`Unknown`](Self::Unknown) once, at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Zone is active and resolving.
    Active,
    /// Zone is pending activation/verification.
    Pending,
    /// Zone has been deactivated or deleted on the provider side.
    Inactive,
    /// Zone is paused or has been moved away (not resolving through the provider).
    Paused,
    /// Status could not be determined.
    Unknown,
}

impl ZoneStatus {
    /// Map a raw provider status string onto the closed status set.
    ///
    /// Cloudflare 状态：active, pending, initializing, moved, deactivated, deleted
    #[must_use]
    pub fn from_remote(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "pending" | "initializing" => Self::Pending,
            "deactivated" | "deleted" => Self::Inactive,
            "moved" | "paused" => Self::Paused,
            _ => Self::Unknown,
        }
    }

    /// Canonical lowercase form, used for persistence.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DNSSEC state of a zone as reported (or requested) via the provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DnssecStatus {
    /// DNSSEC is enabled and the DS record is live.
    Active,
    /// DNSSEC is enabled but activation has not completed.
    Pending,
    /// DNSSEC is disabled.
    Disabled,
    /// DNSSEC disablement has not completed.
    PendingDisabled,
    /// The provider reports an error state for the zone's DNSSEC setup.
    Error,
    /// Status could not be determined.
    Unknown,
}

impl DnssecStatus {
    /// Map a raw provider status string onto the closed status set.
    #[must_use]
    pub fn from_remote(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "disabled" => Self::Disabled,
            "pending-disabled" => Self::PendingDisabled,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// Canonical kebab-case form, used for persistence and API bodies.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Disabled => "disabled",
            Self::PendingDisabled => "pending-disabled",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DnssecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone as returned by the provider, flattened for ingestion.
///
/// Nested remote fields (plan name, account id/name, owner email) are lifted
/// onto flat fields and absent fields default to empty values exactly once,
/// when the wire payload is converted — downstream code never probes nested
/// structures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderZone {
    /// Provider-assigned zone identifier.
    pub id: String,
    /// Zone name (e.g., `"example.com"`).
    pub name: String,
    /// Current zone status.
    pub status: ZoneStatus,
    /// Zone type (e.g., `"full"` or `"partial"`).
    pub zone_type: String,
    /// Billing plan name.
    pub plan_name: String,
    /// Name servers currently assigned by the provider.
    pub name_servers: Vec<String>,
    /// Name servers the zone carried before onboarding.
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
}

/// A DNS record as returned by the provider, flattened for ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDnsRecord {
    /// Provider-assigned record identifier.
    pub id: String,
    /// Zone this record belongs to.
    pub zone_id: String,
    /// Record type string (`"A"`, `"AAAA"`, `"CNAME"`, `"MX"`, `"TXT"`, `"SRV"`, ...).
    ///
    /// Kept as a string: the mirror caches whatever the provider serves,
    /// including types it has no special handling for.
    pub record_type: String,
    /// Fully qualified record name.
    pub name: String,
    /// Record content/value.
    pub content: String,
    /// Time to live in seconds; `1` means "automatic".
    pub ttl: u32,
    /// Whether the provider's CDN proxy is enabled for this record.
    pub proxied: bool,
    /// Priority for MX/SRV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Remote creation timestamp (RFC3339), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    /// Remote modification timestamp (RFC3339), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

// ============ Analytics ============

/// Traffic summary for a zone over an analytics window.
///
/// [`Default`] yields the neutral all-zero summary with no observation
/// timestamp — the value callers substitute when the remote fetch fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Total HTTP requests in the window.
    pub requests: u64,
    /// Total bytes served in the window.
    pub bandwidth: u64,
    /// Total threats mitigated in the window.
    pub threats: u64,
    /// When the summary was observed; `None` when the fetch failed.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============ Fetch Outcome ============

/// Result of a walk-all-pages collection fetch.
///
/// Collection fetches fail soft: a failed page stops paging and returns
/// whatever was accumulated with `complete = false`. Callers must treat a
/// short result as *possibly incomplete* — in particular, an incomplete
/// item set must never drive deletions in a reconciliation pass.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    /// Items accumulated across the pages that were fetched.
    pub items: Vec<T>,
    /// `true` when the provider reported no further pages; `false` when
    /// paging stopped early on an error or the page cap.
    pub complete: bool,
}

impl<T> FetchOutcome<T> {
    /// A fetch that walked every page the provider reported.
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            complete: true,
        }
    }

    /// A fetch that stopped early; `items` holds the accumulated prefix.
    #[must_use]
    pub fn truncated(items: Vec<T>) -> Self {
        Self {
            items,
            complete: false,
        }
    }
}

// ============ Credentials ============

/// Validation error for provider credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Static credential pair for the provider API.
///
/// Both fields are required; a client cannot be partially configured.
/// Construction is the fatal-configuration boundary: nothing downstream
/// (store wiring, services, runs) exists until this validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredentials {
    /// Account email, sent as the auth-email header.
    pub email: String,
    /// API key, sent as the auth-key header.
    pub api_key: String,
}

impl ApiCredentials {
    /// Construct credentials, validating that both fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if either field is empty or
    /// whitespace-only.
    pub fn new(
        email: impl Into<String>,
        api_key: impl Into<String>,
    ) -> std::result::Result<Self, CredentialValidationError> {
        let email = Self::required_field(email.into(), "email", "Account Email")?;
        let api_key = Self::required_field(api_key.into(), "apiKey", "API Key")?;
        Ok(Self { email, api_key })
    }

    /// Read credentials from the `CLOUDFLARE_EMAIL` / `CLOUDFLARE_API_KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError::MissingField`] for an unset
    /// variable, [`CredentialValidationError::EmptyField`] for a blank one.
    pub fn from_env() -> std::result::Result<Self, CredentialValidationError> {
        let email = std::env::var("CLOUDFLARE_EMAIL").map_err(|_| {
            CredentialValidationError::MissingField {
                field: "email".to_string(),
                label: "Account Email".to_string(),
            }
        })?;
        let api_key = std::env::var("CLOUDFLARE_API_KEY").map_err(|_| {
            CredentialValidationError::MissingField {
                field: "apiKey".to_string(),
                label: "API Key".to_string(),
            }
        })?;
        Self::new(email, api_key)
    }

    /// 校验字段非空
    fn required_field(
        value: String,
        field: &str,
        label: &str,
    ) -> std::result::Result<String, CredentialValidationError> {
        if value.trim().is_empty() {
            return Err(CredentialValidationError::EmptyField {
                field: field.to_string(),
                label: label.to_string(),
            });
        }
        Ok(value)
    }
}
