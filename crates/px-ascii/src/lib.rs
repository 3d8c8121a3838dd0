/// ASCII conversion engine for pixscii.
///
/// Converts pixel frames to character grids with per-cell color.

pub mod dominant;
pub mod luminance;

pub use dominant::dominant_color;
pub use luminance::convert;
