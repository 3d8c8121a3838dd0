use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use px_core::frame::FrameBuffer;

/// Encode le canvas en PNG RGBA sur disque.
///
/// # Errors
/// Returns an error if the buffer is inconsistent or the file cannot be
/// written.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let img = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or_else(
        || {
            anyhow::anyhow!(
                "Buffer RGBA incohérent : {}×{} pour {} bytes",
                frame.width,
                frame.height,
                frame.data.len()
            )
        },
    )?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}
