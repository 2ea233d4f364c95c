//! Cloudflare API 类型定义

use serde::Deserialize;

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
    pub result_info: Option<CloudflareResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    #[allow(dead_code)]
    pub page: u32,
    #[allow(dead_code)]
    pub per_page: u32,
    pub total_count: u32,
}

/// Cloudflare Zone 结构
///
/// 缺失字段在反序列化时填充默认值，映射逻辑不再逐层探测。
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub zone_type: String,
    #[serde(default)]
    pub plan: Option<CloudflarePlan>,
    #[serde(default)]
    pub name_servers: Option<Vec<String>>,
    #[serde(default)]
    pub original_name_servers: Option<Vec<String>>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
    #[serde(default)]
    pub account: Option<CloudflareAccount>,
    #[serde(default)]
    pub owner: Option<CloudflareOwner>,
    #[serde(default)]
    pub activated_on: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflarePlan {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareOwner {
    #[serde(default)]
    pub email: Option<String>,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
}

/// Cloudflare 的 TTL=1 表示 "automatic"
fn default_ttl() -> u32 {
    1
}

/// `GET/PATCH /zones/{id}/dnssec` 的 result 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareDnssec {
    #[serde(default)]
    pub status: String,
}

// ============ GraphQL Analytics ============

/// GraphQL 响应外层（与 REST 的 `CloudflareResponse` 结构不同）
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsData {
    pub viewer: AnalyticsViewer,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsViewer {
    #[serde(default)]
    pub zones: Vec<AnalyticsZone>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsZone {
    #[serde(rename = "httpRequests1dGroups", default)]
    pub http_requests_1d_groups: Vec<AnalyticsGroup>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsGroup {
    pub sum: AnalyticsSum,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsSum {
    #[serde(default)]
    pub requests: u64,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub threats: u64,
}
