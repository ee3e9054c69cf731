use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A locally rendered preview of a selected file, held as a
/// `data:<mime>;base64,<payload>` URI.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    data_uri: String,
    mime_end: usize,
}

impl PreviewImage {
    /// Encodes raw bytes as a data URI.
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        let data_uri = format!(
            "{DATA_PREFIX}{mime_type}{BASE64_MARKER}{}",
            STANDARD.encode(bytes)
        );
        Self {
            data_uri,
            mime_end: DATA_PREFIX.len() + mime_type.len(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.data_uri[DATA_PREFIX.len()..self.mime_end]
    }

    /// Decodes the payload back into raw bytes, e.g. for an image widget.
    pub fn decode_payload(&self) -> Result<Vec<u8>, PreviewError> {
        let payload = &self.data_uri[self.mime_end + BASE64_MARKER.len()..];
        Ok(STANDARD.decode(payload)?)
    }
}

impl fmt::Display for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data_uri)
    }
}

// Data URIs can be megabytes long; keep debug output readable.
impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewImage")
            .field("mime_type", &self.mime_type())
            .field("len", &self.data_uri.len())
            .finish()
    }
}
