//! # html2pdf-cloud
//!
//! Convert HTML documents to PDF by delegating to a cloud conversion API.
//!
//! The crate does no rendering itself. It asks the provider for a conversion
//! *process*, hands it the URL of the HTML source, and either receives the
//! PDF bytes inline or lets the provider upload the PDF straight to S3.
//!
//! ## Request Flow
//!
//! ```text
//! source URL
//!  │
//!  ├─ 1. Process   form POST {base}/process  → worker URL (// → https://)
//!  ├─ 2. Delivery  bucket + key configured?  → S3 upload : inline download
//!  └─ 3. Convert   JSON POST worker URL      → PDF bytes | uploaded to S3
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use html2pdf_cloud::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CLOUDCONVERT_API_KEY / CLOUDCONVERT_BASE_URL
//!     let config = ConversionConfig::from_env()?;
//!     let output = convert("https://example.com/invoice.html", &config).await?;
//!     if let Some(pdf) = output.pdf() {
//!         std::fs::write("invoice.pdf", pdf)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `html2pdf` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::conversion::{Acl, Conversion, Delivery, S3Output};
pub use client::{Client, Process};
pub use config::{ConversionConfig, ConversionConfigBuilder, S3Destination, DEFAULT_BASE_URL};
pub use convert::{build_conversion, convert, convert_sync, convert_to_file, CloudConvert};
pub use error::CloudConvertError;
pub use output::ConversionOutput;
