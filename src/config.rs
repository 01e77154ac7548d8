//! Configuration types for cloud HTML-to-PDF conversion.
//!
//! Everything a conversion needs lives in [`ConversionConfig`], built via
//! [`ConversionConfigBuilder`] or loaded from the environment with
//! [`ConversionConfig::from_env`]. The optional [`S3Destination`] decides the
//! delivery mode: when it names both a bucket and a key the provider uploads
//! the PDF itself, otherwise the bytes come back inline.

use crate::error::CloudConvertError;
use std::fmt;

/// Base URL of the public provider API.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudconvert.com";

/// Configuration for a cloud conversion.
///
/// # Example
/// ```rust
/// use html2pdf_cloud::{ConversionConfig, S3Destination};
///
/// let config = ConversionConfig::builder()
///     .api_key("secret")
///     .destination(S3Destination::new("my-bucket", "reports/2024-01"))
///     .build()
///     .unwrap();
/// assert!(config.destination.is_some());
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Provider API root, without the `/process` suffix. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Provider API key, sent as the `apikey` form field.
    pub api_key: String,

    /// Where the provider should store the PDF. `None` means inline download.
    pub destination: Option<S3Destination>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            destination: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("destination", &self.destination)
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Load the provider settings from `CLOUDCONVERT_API_KEY` and
    /// `CLOUDCONVERT_BASE_URL`. No destination is set.
    pub fn from_env() -> Result<Self, CloudConvertError> {
        let mut builder = Self::builder();
        if let Ok(key) = std::env::var("CLOUDCONVERT_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(url) = std::env::var("CLOUDCONVERT_BASE_URL") {
            if !url.is_empty() {
                builder = builder.base_url(url);
            }
        }
        builder.build()
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn destination(mut self, destination: S3Destination) -> Self {
        self.config.destination = Some(destination);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, CloudConvertError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(CloudConvertError::InvalidConfig(
                "API key must not be empty".into(),
            ));
        }
        if !(c.base_url.starts_with("http://") || c.base_url.starts_with("https://")) {
            return Err(CloudConvertError::InvalidConfig(format!(
                "base URL must be an HTTP/HTTPS URL, got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

// ── S3 destination ───────────────────────────────────────────────────────

/// An S3 location the provider uploads the converted PDF to.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct S3Destination {
    pub access_key: String,
    pub access_secret: String,
    pub bucket: String,
    /// Object key; also used as the stem of the uploaded source filename.
    pub key: String,
    pub region: Option<String>,
}

impl S3Destination {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn credentials(mut self, access_key: impl Into<String>, access_secret: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self.access_secret = access_secret.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Both bucket and key are set, so the provider can upload the result.
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty() && !self.key.is_empty()
    }
}

impl fmt::Debug for S3Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Destination")
            .field("access_key", &self.access_key)
            .field("access_secret", &redact(&self.access_secret))
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("region", &self.region)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
