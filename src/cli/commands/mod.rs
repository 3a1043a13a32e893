pub mod solve;
pub mod extract;
pub mod graph;
pub mod history;

use anyhow::{ Context, Result };
use std::path::Path;

use mathsnap::ImagePayload;

/// Read and base64-encode an image file
pub fn load_image(path: &Path) -> Result<ImagePayload> {
    ImagePayload::from_path(path).with_context(|| format!("Failed to read image {}", path.display()))
}
