//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// Cloudflare error code mapping
/// Reference: <https://api.cloudflare.com/#getting-started-responses>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // Authentication error
            // 6003: Invalid request headers
            // 6103: Invalid format for X-Auth-Key header
            // 9103: Unknown X-Auth-Key or X-Auth-Email
            // 10000: Authentication error
            Some("6003" | "6103" | "9103" | "10000") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Authorization error
            // 9109: Unauthorized to access requested resource / Max auth failures reached
            // 10001: Unauthorized access
            Some("9109" | "10001") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Zone does not exist / cannot be routed to
            // 7000: No route for that URI
            // 7003: Could not route to /path. perhaps your object identifier is invalid?
            // 1001: Invalid zone identifier
            Some("7000" | "7003" | "1001") => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone_id: context.zone_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // Rate limiting
            // 971: Please wait and consider throttling your request speed
            // 10100: More than 1200 requests per 5 minutes
            Some("971" | "10100") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
    use crate::types::ApiCredentials;

    fn provider() -> CloudflareProvider {
        CloudflareProvider::new(ApiCredentials {
            email: "test@example.com".to_string(),
            api_key: "test-key".to_string(),
        })
    }

    fn ctx() -> ErrorContext {
        ErrorContext::default()
    }

    fn ctx_with_zone() -> ErrorContext {
        ErrorContext {
            zone_id: Some("zone-123".to_string()),
        }
    }

    // ---- Auth errors ----

    #[test]
    fn auth_error_6003() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("6003", "bad header"), ctx());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn auth_error_6103() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("6103", "invalid X-Auth-Key"), ctx());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn auth_error_9103() {
        let p = provider();
        let err = p.map_error(
            RawApiError::with_code("9103", "unknown X-Auth-Key or X-Auth-Email"),
            ctx(),
        );
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn auth_error_10000() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("10000", "auth error"), ctx());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    // ---- Permission errors ----

    #[test]
    fn permission_denied_9109() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("9109", "unauthorized"), ctx());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
    }

    #[test]
    fn permission_denied_10001() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("10001", "unauthorized access"), ctx());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
    }

    // ---- Zone not found ----

    #[test]
    fn zone_not_found_7000() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("7000", "no route"), ctx_with_zone());
        assert!(matches!(
            err,
            ProviderError::ZoneNotFound { zone_id, .. } if zone_id == "zone-123"
        ));
    }

    #[test]
    fn zone_not_found_7003() {
        let p = provider();
        let err = p.map_error(
            RawApiError::with_code("7003", "could not route"),
            ctx_with_zone(),
        );
        assert!(matches!(err, ProviderError::ZoneNotFound { .. }));
    }

    #[test]
    fn zone_not_found_default_context() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("7000", "no route"), ctx());
        assert!(matches!(
            err,
            ProviderError::ZoneNotFound { zone_id, .. } if zone_id == "<unknown>"
        ));
    }

    // ---- Rate limiting ----

    #[test]
    fn rate_limited_971() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("971", "slow down"), ctx());
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[test]
    fn rate_limited_10100() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("10100", "too many requests"), ctx());
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    // ---- Fallback ----

    #[test]
    fn fallback_unknown_code() {
        let p = provider();
        let err = p.map_error(
            RawApiError::with_code("99999", "something unexpected"),
            ctx(),
        );
        assert!(matches!(
            err,
            ProviderError::Unknown { raw_code, raw_message, .. }
                if raw_code.as_deref() == Some("99999") && raw_message == "something unexpected"
        ));
    }

    #[test]
    fn fallback_no_code() {
        let p = provider();
        let err = p.map_error(RawApiError::new("no code at all"), ctx());
        assert!(matches!(
            err,
            ProviderError::Unknown { raw_code: None, raw_message, .. }
                if raw_message == "no code at all"
        ));
    }

    // ---- Provider name ----

    #[test]
    fn provider_name_is_cloudflare() {
        let p = provider();
        assert_eq!(p.provider_name(), "cloudflare");
    }

    #[test]
    fn error_contains_provider_name() {
        let p = provider();
        let err = p.map_error(RawApiError::with_code("6003", "bad header"), ctx());
        assert!(matches!(
            err,
            ProviderError::InvalidCredentials { provider, .. } if provider == "cloudflare"
        ));
    }
}
