/// Configuration, types, and shared structures for pixscii.
///
/// This crate contains all shared types and configuration logic
/// used across the pixscii workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::CharRamp;
pub use config::{BgMode, RenderConfig};
pub use error::CoreError;
pub use frame::{AsciiCell, AsciiGrid, FrameBuffer};
