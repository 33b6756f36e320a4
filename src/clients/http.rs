//! 出站 HTTP 适配器
//!
//! 三个服务客户端共用一个 reqwest::Client：
//! - 开启 cookie store，登录后的会话 cookie 自动随请求携带
//! - 默认 Accept 头与浏览器端保持一致
//! - 有界超时、无重试：挂起的请求在超时后以一次失败收场

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;

/// 构建共享的 HTTP 客户端
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );

    let client = reqwest::Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    Ok(client)
}

/// 检查响应状态，非 2xx 统一折叠为 BadResponse
pub fn expect_success(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::api_bad_response(endpoint, status.as_u16()).into())
    }
}
