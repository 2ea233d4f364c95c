//! Zone security posture analysis
//!
//! Derives a DNSSEC-enablement recommendation tier from the shape of a
//! zone's DNS record set. Pure function, no side effects, total over any
//! finite record sequence including the empty one.

use std::collections::BTreeSet;

use serde::Serialize;
use zone_mirror_provider::ProviderDnsRecord;

/// TXT content markers that indicate mail/security infrastructure is in use.
const SECURITY_TXT_MARKERS: [&str; 5] = ["v=spf1", "v=dkim1", "v=dmarc1", "dmarc", "spf"];

/// Pseudo record-type signal for a TXT record carrying a security marker.
const TXT_SECURITY: &str = "TXT_SECURITY";

/// Recommendation tier for enabling DNSSEC on a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecurityRecommendation {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Consider")]
    Consider,
    #[serde(rename = "Optional")]
    Optional,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl std::fmt::Display for SecurityRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::Recommended => "Recommended",
            Self::Consider => "Consider",
            Self::Optional => "Optional",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// How actively a zone's record set suggests it is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
    Minimal,
    Unknown,
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Minimal => "Minimal",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Result of analyzing one zone's record set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureAnalysis {
    /// Recommendation tier.
    pub recommendation: SecurityRecommendation,
    /// Activity level backing the recommendation.
    pub activity_level: ActivityLevel,
    /// All record types observed, uppercased and deduplicated.
    pub record_types: Vec<String>,
    /// Active-usage signals observed (A/AAAA/CNAME/MX/SRV/`TXT_SECURITY`).
    pub active_record_types: Vec<String>,
    /// Whether any TXT record carried an SPF/DKIM/DMARC marker.
    pub has_security_records: bool,
}

impl PostureAnalysis {
    /// The value used when a zone's records could not be fetched or
    /// analyzed — never raise past this boundary.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            recommendation: SecurityRecommendation::Unknown,
            activity_level: ActivityLevel::Unknown,
            record_types: Vec::new(),
            active_record_types: Vec::new(),
            has_security_records: false,
        }
    }
}

/// Classify a zone's record set into a recommendation tier.
///
/// Evaluated in fixed priority order over the active signals observed:
/// 1. any of A / AAAA / MX / TXT-with-security-marker ⇒ Highly Recommended, High
/// 2. else any of CNAME / SRV ⇒ Recommended, Medium
/// 3. else any other active signal ⇒ Consider, Low
/// 4. else ⇒ Optional, Minimal
#[must_use]
pub fn analyze_records(records: &[ProviderDnsRecord]) -> PostureAnalysis {
    let mut record_types: BTreeSet<String> = BTreeSet::new();
    let mut active: BTreeSet<String> = BTreeSet::new();
    let mut has_security_records = false;

    for record in records {
        let record_type = record.record_type.to_uppercase();
        if record_type.is_empty() {
            continue;
        }
        record_types.insert(record_type.clone());

        match record_type.as_str() {
            "A" | "AAAA" | "CNAME" | "MX" | "SRV" => {
                active.insert(record_type);
            }
            "TXT" => {
                let content = record.content.to_lowercase();
                if SECURITY_TXT_MARKERS
                    .iter()
                    .any(|marker| content.contains(marker))
                {
                    has_security_records = true;
                    active.insert(TXT_SECURITY.to_string());
                }
            }
            _ => {}
        }
    }

    let (recommendation, activity_level) = if active.is_empty() {
        (SecurityRecommendation::Optional, ActivityLevel::Minimal)
    } else if ["A", "AAAA", "MX", TXT_SECURITY]
        .iter()
        .any(|t| active.contains(*t))
    {
        (SecurityRecommendation::HighlyRecommended, ActivityLevel::High)
    } else if ["CNAME", "SRV"].iter().any(|t| active.contains(*t)) {
        (SecurityRecommendation::Recommended, ActivityLevel::Medium)
    } else {
        (SecurityRecommendation::Consider, ActivityLevel::Low)
    };

    PostureAnalysis {
        recommendation,
        activity_level,
        record_types: record_types.into_iter().collect(),
        active_record_types: active.into_iter().collect(),
        has_security_records,
    }
}
