//! HTTP client for the cloud conversion provider.
//!
//! A conversion is two sequential calls:
//!
//! ```text
//! new_process ──▶ start_conversion
//! (form POST       (JSON POST to the
//!  {base}/process)  process URL it returned)
//! ```
//!
//! Both calls treat anything but HTTP 200 as fatal and surface the decoded
//! error body. There is no retry and no timeout beyond reqwest's default.

pub mod conversion;

use crate::error::CloudConvertError;
use conversion::Conversion;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A provider-assigned worker endpoint for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Where to post the [`Conversion`]. Always absolute once returned by
    /// [`Client::new_process`].
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    /// Seconds the provider allows the conversion to run.
    #[serde(rename = "maxtime", default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u64>,
    /// Conversion minutes left on the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
}

/// Provider API client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Build a client with a default `reqwest::Client`.
    ///
    /// Fails when the HTTP client cannot be built, e.g. when the TLS backend
    /// does not initialise.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, CloudConvertError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(CloudConvertError::ClientBuild)?;
        Ok(Self::with_http(http, base_url, api_key))
    }

    /// Use a caller-built `reqwest::Client` (proxies, custom TLS, …).
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the provider for a process able to convert `input_format` to
    /// `output_format`.
    pub async fn new_process(
        &self,
        input_format: &str,
        output_format: &str,
    ) -> Result<Process, CloudConvertError> {
        let url = format!("{}/process", self.base_url);
        let form = [
            ("apikey", self.api_key.as_str()),
            ("inputformat", input_format),
            ("outputformat", output_format),
        ];

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| http_error(&url, e))?;
        let body = read_success_body(&url, response).await?;

        let mut process: Process =
            serde_json::from_slice(&body).map_err(|e| CloudConvertError::InvalidResponse {
                url: url.clone(),
                detail: e.to_string(),
            })?;
        process.url = normalize_process_url(&process.url);

        debug!(
            "Process {} assigned at {} (expires: {:?})",
            process.id.as_deref().unwrap_or("<none>"),
            process.url,
            process.expires
        );
        Ok(process)
    }

    /// Post `conversion` to the process endpoint.
    ///
    /// Returns the response body when the conversion asked for inline
    /// download, `None` otherwise.
    pub async fn start_conversion(
        &self,
        process: &Process,
        conversion: &Conversion,
    ) -> Result<Option<Vec<u8>>, CloudConvertError> {
        let url = process.url.as_str();
        let response = self
            .http
            .post(url)
            .json(conversion)
            .send()
            .await
            .map_err(|e| http_error(url, e))?;
        let body = read_success_body(url, response).await?;

        if conversion.delivery.is_inline() {
            debug!("Received {} bytes inline from {}", body.len(), url);
            Ok(Some(body))
        } else {
            Ok(None)
        }
    }
}

/// Turn a protocol-relative URL (`//host/path`) into an `https:` one.
pub fn normalize_process_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

fn http_error(url: &str, source: reqwest::Error) -> CloudConvertError {
    CloudConvertError::Http {
        url: url.to_string(),
        source,
    }
}

/// Read the body, or fail with the decoded payload when the status isn't 200.
async fn read_success_body(
    url: &str,
    response: reqwest::Response,
) -> Result<Vec<u8>, CloudConvertError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|e| http_error(url, e))?;

    if status != StatusCode::OK {
        return Err(CloudConvertError::Api {
            url: url.to_string(),
            status: status.as_u16(),
            payload: decode_payload(&body),
        });
    }
    Ok(body.to_vec())
}

fn decode_payload(body: &[u8]) -> serde_json::Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
}
