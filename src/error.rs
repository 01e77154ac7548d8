//! Error type for the html2pdf-cloud library.
//!
//! There is exactly one failure mode worth modelling: the conversion did not
//! produce a PDF. [`CloudConvertError`] says *why*, from the transport layer
//! up to local file output, and is returned as `Err(CloudConvertError)` from
//! every fallible operation in the crate. Nothing is retried locally.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the html2pdf-cloud library.
#[derive(Debug, Error)]
pub enum CloudConvertError {
    // ── Transport errors ──────────────────────────────────────────────────
    /// The HTTP request could not be sent or its body could not be read.
    #[error("Request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // ── Provider errors ───────────────────────────────────────────────────
    /// The provider answered with something other than HTTP 200.
    ///
    /// `payload` is the decoded JSON error body. A body that is not JSON is
    /// kept as a string value; an empty body becomes `null`.
    #[error("[CloudConvert] did not receive HTTP 200 from '{url}' (got {status}), response: {payload}")]
    Api {
        url: String,
        status: u16,
        payload: serde_json::Value,
    },

    /// HTTP 200, but the body was not what the provider promised.
    #[error("Invalid response from '{url}': {detail}")]
    InvalidResponse { url: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CloudConvertError {
    /// HTTP status returned by the provider, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CloudConvertError::Api { status, .. } => Some(*status),
            CloudConvertError::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
