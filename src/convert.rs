//! HTML-to-PDF conversion entry points.
//!
//! [`CloudConvert`] is the adapter: it requests an `html → pdf` process,
//! decides between inline download and S3 upload, and starts the conversion.
//! The free functions [`convert`], [`convert_to_file`] and [`convert_sync`]
//! wrap it for callers holding a [`ConversionConfig`].

use crate::client::conversion::{Acl, Conversion, Delivery, S3Output};
use crate::client::Client;
use crate::config::{ConversionConfig, S3Destination};
use crate::error::CloudConvertError;
use crate::output::ConversionOutput;
use std::io::Write;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

const INPUT_FORMAT: &str = "html";
const OUTPUT_FORMAT: &str = "pdf";

/// Converts HTML documents to PDF through the provider.
#[derive(Debug, Clone)]
pub struct CloudConvert {
    client: Client,
}

impl CloudConvert {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ConversionConfig) -> Result<Self, CloudConvertError> {
        Ok(Self::new(Client::new(&config.base_url, &config.api_key)?))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Convert the HTML document at `source` (a URL the provider downloads).
    ///
    /// With a configured `destination` the provider uploads the PDF to S3
    /// and [`ConversionOutput::Uploaded`] is returned; otherwise the PDF
    /// bytes come back as [`ConversionOutput::Inline`].
    pub async fn convert(
        &self,
        source: &str,
        destination: Option<&S3Destination>,
    ) -> Result<ConversionOutput, CloudConvertError> {
        info!("[CloudConvert] converting to PDF: {}", source);

        let process = self.client.new_process(INPUT_FORMAT, OUTPUT_FORMAT).await?;

        let conversion = build_conversion(source, destination);
        match &conversion.delivery {
            Delivery::Inline => {
                info!("[CloudConvert] requesting inline download: {}", conversion.filename)
            }
            Delivery::S3(s3) => info!("[CloudConvert] uploading conversion to S3: {}", s3.path),
        }

        let body = self.client.start_conversion(&process, &conversion).await?;

        match conversion.delivery {
            Delivery::Inline => body.map(ConversionOutput::inline).ok_or_else(|| {
                CloudConvertError::InvalidResponse {
                    url: process.url.clone(),
                    detail: "inline download returned no document".into(),
                }
            }),
            Delivery::S3(s3) => Ok(ConversionOutput::Uploaded {
                bucket: s3.bucket,
                key: s3.path,
            }),
        }
    }

    /// Whether a conversion to `destination` leaves the PDF already uploaded,
    /// making the caller's own upload step unnecessary.
    pub fn uploaded(destination: Option<&S3Destination>) -> bool {
        destination.is_some_and(S3Destination::is_configured)
    }
}

/// Build the conversion request for `source`.
///
/// A destination without both bucket and key means inline download under a
/// fresh `<uuid>.html` name. Otherwise the provider stores the result under
/// the destination key with `public-read` access.
pub fn build_conversion(source: &str, destination: Option<&S3Destination>) -> Conversion {
    let (filename, delivery) = match destination.filter(|d| d.is_configured()) {
        None => (format!("{}.html", Uuid::new_v4()), Delivery::Inline),
        Some(d) => (
            format!("{}.html", d.key),
            Delivery::S3(S3Output {
                access_key: d.access_key.clone(),
                access_secret: d.access_secret.clone(),
                bucket: d.bucket.clone(),
                path: d.key.clone(),
                acl: Acl::PublicRead,
                region: d.region.clone(),
            }),
        ),
    };

    Conversion {
        input: "download".to_string(),
        file: source.to_string(),
        filename,
        output_format: OUTPUT_FORMAT.to_string(),
        wait: true,
        delivery,
    }
}

/// Convert `source` using `config`, honouring `config.destination`.
pub async fn convert(
    source: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, CloudConvertError> {
    CloudConvert::from_config(config)?
        .convert(source.as_ref(), config.destination.as_ref())
        .await
}

/// Convert `source` inline and write the PDF to `output_path`.
///
/// `config.destination` is ignored: the bytes have to come back to be
/// written. The write is atomic (temp file in the same directory + rename),
/// so a failed conversion never leaves a truncated PDF behind.
pub async fn convert_to_file(
    source: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<usize, CloudConvertError> {
    let output = CloudConvert::from_config(config)?
        .convert(source.as_ref(), None)
        .await?;
    let pdf = output
        .into_pdf()
        .ok_or_else(|| CloudConvertError::Internal("inline conversion produced no PDF".into()))?;

    let path = output_path.as_ref().to_path_buf();
    let len = pdf.len();
    tokio::task::spawn_blocking(move || write_atomic(&path, &pdf))
        .await
        .map_err(|e| CloudConvertError::Internal(format!("write task failed: {e}")))??;
    Ok(len)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
///
/// # Errors
///
/// Besides the errors of [`convert`], returns [`CloudConvertError::Internal`]
/// when called from within a tokio runtime, where blocking on a nested
/// runtime would panic. Async callers use [`convert`] instead.
pub fn convert_sync(
    source: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, CloudConvertError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(CloudConvertError::Internal(
            "convert_sync called from within a tokio runtime; use convert().await".into(),
        ));
    }
    tokio::runtime::Runtime::new()
        .map_err(|e| CloudConvertError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(source, config))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CloudConvertError> {
    let write_failed = |source: std::io::Error| CloudConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_failed)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_failed)?;
    tmp.write_all(bytes).map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_destination_requests_inline_with_uuid_filename() {
        let conv = build_conversion("https://example.com/a.html", None);
        assert_eq!(conv.delivery, Delivery::Inline);
        assert_eq!(conv.input, "download");
        assert_eq!(conv.file, "https://example.com/a.html");
        assert_eq!(conv.output_format, "pdf");
        assert!(conv.wait);

        let stem = conv.filename.strip_suffix(".html").expect("html suffix");
        assert!(Uuid::parse_str(stem).is_ok(), "not a uuid: {stem}");
    }

    #[test]
    fn inline_filenames_are_unique() {
        let a = build_conversion("u", None);
        let b = build_conversion("u", None);
        assert_ne!(a.filename, b.filename);
    }

    #[test]
    fn half_configured_destination_falls_back_to_inline() {
        let only_bucket = S3Destination::new("bucket", "");
        let conv = build_conversion("u", Some(&only_bucket));
        assert!(conv.delivery.is_inline());

        let only_key = S3Destination::new("", "key");
        assert!(build_conversion("u", Some(&only_key)).delivery.is_inline());
    }

    #[test]
    fn configured_destination_requests_public_read_upload() {
        let dest = S3Destination::new("reports", "2024/q1")
            .credentials("AKIA", "secret")
            .region("eu-west-1");
        let conv = build_conversion("https://example.com/q1.html", Some(&dest));

        assert_eq!(conv.filename, "2024/q1.html");
        match &conv.delivery {
            Delivery::S3(s3) => {
                assert_eq!(s3.bucket, "reports");
                assert_eq!(s3.path, "2024/q1");
                assert_eq!(s3.access_key, "AKIA");
                assert_eq!(s3.access_secret, "secret");
                assert_eq!(s3.acl, Acl::PublicRead);
                assert_eq!(s3.region.as_deref(), Some("eu-west-1"));
            }
            Delivery::Inline => panic!("expected S3 delivery"),
        }

        let wire = serde_json::to_value(&conv).unwrap();
        assert!(wire.get("download").is_none());
        assert_eq!(wire["output"]["s3"]["acl"], "public-read");
    }

    #[test]
    fn uploaded_reflects_destination() {
        assert!(!CloudConvert::uploaded(None));
        assert!(!CloudConvert::uploaded(Some(&S3Destination::new("b", ""))));
        assert!(CloudConvert::uploaded(Some(&S3Destination::new("b", "k"))));
    }

    #[test]
    fn from_config_builds_client_for_base_url() {
        let config = ConversionConfig::builder()
            .api_key("k")
            .base_url("http://localhost:9000/")
            .build()
            .unwrap();
        let converter = CloudConvert::from_config(&config).unwrap();
        assert_eq!(converter.client().base_url(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn convert_sync_inside_runtime_is_an_error() {
        let config = ConversionConfig::builder().api_key("k").build().unwrap();
        let err = convert_sync("https://example.com/a.html", &config).unwrap_err();
        assert!(matches!(err, CloudConvertError::Internal(_)), "got: {err:?}");
        assert!(err.to_string().contains("within a tokio runtime"));
    }

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.pdf");
        write_atomic(&path, b"%PDF-1.4").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }
}
