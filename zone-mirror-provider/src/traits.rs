use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    AnalyticsSummary, DnssecStatus, FetchOutcome, ProviderDnsRecord, ProviderZone,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone ID（用于 `ZoneNotFound` 等错误）
    pub zone_id: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：网络错误
    fn network_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Remote zone inventory Trait
///
/// The boundary the reconciliation core consumes. Collection fetches walk
/// every page and fail soft (see [`FetchOutcome`]); per-resource operations
/// are independently fallible and must never abort a caller's broader loop —
/// callers catch and substitute a neutral default.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// 获取全部 zone（遍历所有分页）
    async fn fetch_zones(&self) -> FetchOutcome<ProviderZone>;

    /// 获取某个 zone 的全部 DNS 记录（遍历所有分页）
    async fn fetch_records(&self, zone_id: &str) -> FetchOutcome<ProviderDnsRecord>;

    /// 查询 zone 的 DNSSEC 状态
    async fn dnssec_status(&self, zone_id: &str) -> Result<DnssecStatus>;

    /// 设置 zone 的 DNSSEC 状态，返回提供商回报的新状态
    async fn set_dnssec_status(&self, zone_id: &str, status: DnssecStatus)
        -> Result<DnssecStatus>;

    /// 查询 zone 的流量汇总（最近 `window_days` 天）
    async fn zone_analytics(&self, zone_id: &str, window_days: u32) -> Result<AnalyticsSummary>;
}
