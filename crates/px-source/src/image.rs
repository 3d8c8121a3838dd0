use std::path::Path;

use anyhow::{Context, Result};
use px_core::error::CoreError;
use px_core::frame::FrameBuffer;

/// Charge une image depuis le disque, normalisée en RGBA 8 bits.
///
/// Toute image sans canal alpha ressort entièrement opaque.
///
/// # Errors
/// Retourne une erreur si l'image ne peut pas être décodée, ou
/// [`CoreError::InvalidDimensions`] si elle est vide.
///
/// # Example
/// ```no_run
/// use px_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height }.into());
    }
    log::debug!("Image chargée : {}×{} ({})", width, height, path.display());
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}
