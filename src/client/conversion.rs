//! Conversion request descriptor posted to a process URL.
//!
//! The provider expects either `"download": "inline"` *or* an
//! `"output": {"s3": {...}}` block, never both. [`Delivery`] makes that
//! choice a type instead of two independently-optional fields, and the
//! hand-written `Serialize` impl flattens it back into the wire layout.

use serde::{Serialize, Serializer};

/// One conversion job for a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// How the provider obtains the source: `"download"` fetches `file` by URL.
    pub input: String,
    /// Source document reference (URL for `"download"` input).
    pub file: String,
    /// Name the provider gives the fetched source.
    pub filename: String,
    pub output_format: String,
    /// Block until the conversion finished before answering.
    pub wait: bool,
    pub delivery: Delivery,
}

/// Where the converted document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Return the bytes in the response body.
    Inline,
    /// Upload to S3; the response body carries no document.
    S3(S3Output),
}

impl Delivery {
    pub fn is_inline(&self) -> bool {
        matches!(self, Delivery::Inline)
    }
}

/// S3 upload target as the provider names its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3Output {
    #[serde(rename = "accesskeyid")]
    pub access_key: String,
    #[serde(rename = "secretaccesskey")]
    pub access_secret: String,
    pub bucket: String,
    pub path: String,
    pub acl: Acl,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Canned S3 access-control setting for the uploaded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Acl {
    #[default]
    PublicRead,
    Private,
}

#[derive(Serialize)]
struct OutputBody<'a> {
    s3: &'a S3Output,
}

#[derive(Serialize)]
struct ConversionBody<'a> {
    input: &'a str,
    file: &'a str,
    filename: &'a str,
    outputformat: &'a str,
    wait: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    download: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<OutputBody<'a>>,
}

impl Serialize for Conversion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (download, output) = match &self.delivery {
            Delivery::Inline => (Some("inline"), None),
            Delivery::S3(s3) => (None, Some(OutputBody { s3 })),
        };
        ConversionBody {
            input: &self.input,
            file: &self.file,
            filename: &self.filename,
            outputformat: &self.output_format,
            wait: self.wait,
            download,
            output,
        }
        .serialize(serializer)
    }
}
