//! Cloudflare HTTP 请求方法

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareProvider, CloudflareResponse};

use super::types::GraphQlResponse;

impl CloudflareProvider {
    /// 提取响应中的首个错误（code + message）
    fn first_error<T>(cf_response: &CloudflareResponse<T>) -> RawApiError {
        cf_response
            .errors
            .as_ref()
            .and_then(|errors| {
                errors
                    .first()
                    .map(|e| RawApiError::with_code(e.code.to_string(), e.message.clone()))
            })
            .unwrap_or_else(|| RawApiError::new("Unknown error"))
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| self.network_error(format!("读取响应失败: {e}")))?;

        let cf_response: CloudflareResponse<T> =
            serde_json::from_str(&response_text).map_err(|e| {
                log::error!("JSON 解析失败: {e}");
                log::error!("原始响应: {response_text}");
                self.parse_error(e)
            })?;

        if !cf_response.success {
            let raw = Self::first_error(&cf_response);
            log::error!("API 错误: {}", raw.message);
            return Err(self.map_error(raw, context));
        }

        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 GET 请求 (单页，返回 items 与 total_count)
    pub(crate) async fn get_page<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<T>, u32)> {
        let url = format!("{CF_API_BASE}{path}?page={page}&per_page={per_page}");
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| self.network_error(format!("读取响应失败: {e}")))?;

        let cf_response: CloudflareResponse<Vec<T>> = serde_json::from_str(&response_text)
            .map_err(|e| {
                log::error!("JSON 解析失败: {e}");
                log::error!("原始响应: {response_text}");
                self.parse_error(e)
            })?;

        if !cf_response.success {
            let raw = Self::first_error(&cf_response);
            log::error!("API 错误: {}", raw.message);
            return Err(self.map_error(raw, ErrorContext::default()));
        }

        let total_count = cf_response.result_info.map_or(0, |i| i.total_count);
        let items = cf_response.result.unwrap_or_default();

        Ok((items, total_count))
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("PATCH {url}");

        let response = self
            .client
            .patch(&url)
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| self.network_error(format!("读取响应失败: {e}")))?;

        let cf_response: CloudflareResponse<T> =
            serde_json::from_str(&response_text).map_err(|e| {
                log::error!("JSON 解析失败: {e}");
                log::error!("原始响应: {response_text}");
                self.parse_error(e)
            })?;

        if !cf_response.success {
            let raw = Self::first_error(&cf_response);
            log::error!("API 错误: {}", raw.message);
            return Err(self.map_error(raw, context));
        }

        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 GraphQL POST 请求（响应外层与 REST 不同）
    pub(crate) async fn post_graphql<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        body: &B,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}/graphql");
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| self.network_error(format!("读取响应失败: {e}")))?;

        let gql_response: GraphQlResponse<T> =
            serde_json::from_str(&response_text).map_err(|e| {
                log::error!("JSON 解析失败: {e}");
                log::error!("原始响应: {response_text}");
                self.parse_error(e)
            })?;

        if let Some(errors) = &gql_response.errors
            && let Some(first) = errors.first()
        {
            log::error!("GraphQL 错误: {}", first.message);
            return Err(self.map_error(
                RawApiError::new(first.message.clone()),
                ErrorContext::default(),
            ));
        }

        gql_response
            .data
            .ok_or_else(|| self.parse_error("响应中缺少 data 字段"))
    }
}
