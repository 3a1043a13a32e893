use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Base64-encoded image handed to the vision call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data_base64: String,
    pub mime_type: String,
}

impl ImagePayload {
    /// Wrap an already-encoded camera capture (JPEG)
    pub fn from_base64(data_base64: impl Into<String>) -> Self {
        Self {
            data_base64: data_base64.into(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    /// Read and encode an image file
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self {
            data_base64: BASE64.encode(bytes),
            mime_type: guess_image_mime(path).to_string(),
        })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }

    pub fn is_empty(&self) -> bool {
        self.data_base64.trim().is_empty()
    }
}

fn guess_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}
