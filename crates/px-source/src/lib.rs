/// Image input for pixscii: decoding and resampling.

pub mod image;
pub mod resize;

pub use image::load_image;
pub use resize::resize_frame;
