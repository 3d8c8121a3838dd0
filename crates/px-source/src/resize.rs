use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use px_core::frame::FrameBuffer;

/// Rééchantillonne `src` vers `width × height`.
///
/// Conversion ponctuelle : un resizer est construit par appel, le filtre
/// par défaut de fast_image_resize fait foi.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use px_source::resize::resize_frame;
/// use px_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 25).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 25));
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
    if src.width == width && src.height == height {
        return Ok(FrameBuffer {
            data: src.data.clone(),
            width,
            height,
        });
    }

    // Owned copy: fast_image_resize requires &mut on the source slice.
    let mut src_buf = src.data.clone();
    let src_image = Image::from_slice_u8(src.width, src.height, &mut src_buf, PixelType::U8x4)
        .context("Invalid source dimensions")?;

    let mut dst = FrameBuffer::new(width, height);
    let mut dst_image = Image::from_slice_u8(width, height, &mut dst.data, PixelType::U8x4)
        .context("Invalid destination dimensions")?;

    Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&ResizeOptions::new()))
        .context("Resize failed")?;

    Ok(dst)
}
