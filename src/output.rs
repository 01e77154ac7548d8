//! Result of a cloud conversion.

use serde::Serialize;

/// What a finished conversion left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "delivery", rename_all = "snake_case")]
pub enum ConversionOutput {
    /// The PDF bytes, returned in the provider's response.
    Inline {
        #[serde(skip)]
        pdf: Vec<u8>,
        bytes: usize,
    },
    /// The provider uploaded the PDF to S3 itself.
    Uploaded { bucket: String, key: String },
}

impl ConversionOutput {
    pub(crate) fn inline(pdf: Vec<u8>) -> Self {
        let bytes = pdf.len();
        ConversionOutput::Inline { pdf, bytes }
    }

    /// The provider already stored the PDF, so there is nothing left to upload.
    pub fn is_uploaded(&self) -> bool {
        matches!(self, ConversionOutput::Uploaded { .. })
    }

    /// Borrow the PDF bytes of an inline conversion.
    pub fn pdf(&self) -> Option<&[u8]> {
        match self {
            ConversionOutput::Inline { pdf, .. } => Some(pdf.as_slice()),
            ConversionOutput::Uploaded { .. } => None,
        }
    }

    /// Take the PDF bytes of an inline conversion.
    pub fn into_pdf(self) -> Option<Vec<u8>> {
        match self {
            ConversionOutput::Inline { pdf, .. } => Some(pdf),
            ConversionOutput::Uploaded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_summary_omits_bytes_themselves() {
        let out = ConversionOutput::inline(b"%PDF-1.7".to_vec());
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v, serde_json::json!({ "delivery": "inline", "bytes": 8 }));
        assert!(!out.is_uploaded());
        assert_eq!(out.into_pdf().as_deref(), Some(&b"%PDF-1.7"[..]));
    }

    #[test]
    fn uploaded_has_no_bytes() {
        let out = ConversionOutput::Uploaded {
            bucket: "b".into(),
            key: "k".into(),
        };
        assert!(out.is_uploaded());
        assert!(out.pdf().is_none());
    }
}
