// src/exec/http.rs

//! Single-attempt GET/POST requests.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::config::SettingsMap;
use crate::errors::{CheckrunError, Result};
use crate::exec::ExecutionResult;
use crate::report::Reporter;
use crate::template::{substitute, substitute_map};
use crate::types::HttpMethod;

/// User agent sent unless the task sets its own `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/106.0.0.0 Safari/537.36";

/// What a web request produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    pub success: bool,
    /// `0` when no response was received.
    pub status_code: u16,
    pub body: String,
}

impl HttpResponse {
    fn transport_failure() -> Self {
        Self::default()
    }
}

impl From<HttpResponse> for ExecutionResult {
    fn from(resp: HttpResponse) -> Self {
        Self {
            success: resp.success,
            output: resp.body,
            status_code: Some(i32::from(resp.status_code)),
        }
    }
}

/// Shared HTTP client for all web-request tasks of a run.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, timeout })
    }

    /// Issue exactly one request.
    ///
    /// The URL, every header key/value and every body key/value are
    /// substituted independently. POST is used when `data` is non-empty
    /// (sent form-encoded), otherwise `method_hint` or GET. Any failure
    /// before a response arrives yields `success = false`, status `0` and
    /// an empty body. Any received status counts as success.
    pub async fn request(
        &self,
        url: &str,
        settings: &SettingsMap,
        data: &BTreeMap<String, String>,
        headers: &BTreeMap<String, String>,
        method_hint: Option<HttpMethod>,
        reporter: &dyn Reporter,
    ) -> HttpResponse {
        match self.send(url, settings, data, headers, method_hint, reporter).await {
            Ok(resp) => resp,
            Err(e) => {
                reporter.error(&format!("Error making web request to URL: {url}. Error: {e}"));
                HttpResponse::transport_failure()
            }
        }
    }

    async fn send(
        &self,
        url: &str,
        settings: &SettingsMap,
        data: &BTreeMap<String, String>,
        headers: &BTreeMap<String, String>,
        method_hint: Option<HttpMethod>,
        reporter: &dyn Reporter,
    ) -> Result<HttpResponse> {
        let url = substitute(url, settings)?;
        let header_map = build_headers(&substitute_map(headers, settings)?)?;
        let data = substitute_map(data, settings)?;

        let method = HttpMethod::effective(method_hint, data.is_empty());
        reporter.debug(&format!("Making {method} request to URL: {url}..."));

        let mut req = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url).form(&data),
        };
        req = req.headers(header_map);
        if let Some(limit) = self.timeout {
            req = req.timeout(limit);
        }

        let resp = req.send().await?;
        let status_code = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(HttpResponse {
            success: true,
            status_code,
            body,
        })
    }
}

fn build_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    map.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| CheckrunError::ConfigError(format!("invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            CheckrunError::ConfigError(format!("invalid value for header '{key}': {e}"))
        })?;
        map.insert(name, value);
    }

    Ok(map)
}
