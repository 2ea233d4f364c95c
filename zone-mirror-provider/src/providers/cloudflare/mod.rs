//! Cloudflare Zone Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::types::ApiCredentials;

pub(crate) use types::{CloudflareDnsRecord, CloudflareDnssec, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;
/// 单次遍历的最大分页数，防止异常账户拖垮整次同步
pub(crate) const MAX_PAGE_WALK: u32 = 50;

/// Cloudflare Zone Provider
///
/// Construction requires validated [`ApiCredentials`]; there is no
/// partially configured client.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) email: String,
    pub(crate) api_key: String,
}

impl CloudflareProvider {
    #[must_use]
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            client: create_http_client(),
            email: credentials.email,
            api_key: credentials.api_key,
        }
    }
}
