//! Decoding of `data:` URIs produced by browser image pickers.

use crate::error::{CareError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

const DEFAULT_MIME: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub fn is_data_uri(value: &str) -> bool {
    value.trim_start().starts_with("data:")
}

impl DataUri {
    /// Parses `data:[<mime>][;base64],<payload>`.
    ///
    /// Payloads without the `;base64` marker are percent-decoded.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| CareError::DataUri("missing data: prefix".into()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CareError::DataUri("missing ',' separator".into()))?;

        let (mime, is_base64) = match header.strip_suffix(";base64") {
            Some(mime) => (mime, true),
            None => (header, false),
        };
        // Parameters such as `;charset=utf-8` are not needed for upload.
        let mime = mime.split(';').next().unwrap_or_default().trim();
        let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };

        let bytes = if is_base64 {
            STANDARD
                .decode(payload.trim())
                .map_err(|e| CareError::DataUri(e.to_string()))?
        } else {
            urlencoding::decode_binary(payload.as_bytes()).into_owned()
        };

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    /// Reads a local image, taking the MIME type from its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let mime = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        };
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    /// The `data:<mime>;base64,<payload>` form.
    pub fn to_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}
