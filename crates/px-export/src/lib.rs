/// Output side of pixscii: text writer and colored PNG rasterization.

pub mod background;
pub mod builtin;
pub mod png;
pub mod rasterizer;
pub mod text;

pub use background::resolve_background;
pub use png::save_png;
pub use rasterizer::Rasterizer;
pub use text::{render_text, write_text_file};
