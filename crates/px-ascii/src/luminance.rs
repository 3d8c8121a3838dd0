use anyhow::Result;
use px_core::charset::CharRamp;
use px_core::config::RenderConfig;
use px_core::frame::{AsciiCell, AsciiGrid, FrameBuffer};
use px_source::resize::resize_frame;

/// Hauteur de grille dérivée de la largeur cible et du ratio source.
///
/// Le facteur 0.5 compense une cellule de caractère environ deux fois plus
/// haute que large, pour que le rendu garde le ratio visuel de la source.
/// Bornée à [1, 4096].
///
/// # Example
/// ```
/// use px_ascii::luminance::target_height;
/// assert_eq!(target_height(4, 2, 4), 1);
/// assert_eq!(target_height(100, 100, 100), 50);
/// ```
#[must_use]
pub fn target_height(src_width: u32, src_height: u32, width: u32) -> u32 {
    let aspect = f64::from(src_height) / f64::from(src_width.max(1));
    let height = (f64::from(width) * aspect * 0.5).round() as u32;
    height.clamp(1, 4096)
}

/// Convertit une frame en grille ASCII colorée.
///
/// Rééchantillonne la source vers `config.width × target_height`, puis pour
/// chaque pixel : alpha 0 → cellule espace transparente ; sinon la luminance
/// BT.601 choisit le caractère dans la rampe et la couleur du pixel est
/// conservée, alpha forcé opaque.
///
/// # Errors
/// Returns an error if the resample fails.
///
/// # Example
/// ```
/// use px_ascii::luminance::convert;
/// use px_core::charset::CharRamp;
/// use px_core::config::RenderConfig;
/// use px_core::frame::FrameBuffer;
///
/// let frame = FrameBuffer::new(10, 10); // fully transparent
/// let config = RenderConfig { width: 10, ..RenderConfig::default() };
/// let ramp = CharRamp::new(&config.charset).unwrap();
/// let grid = convert(&frame, &config, &ramp).unwrap();
/// assert!(grid.cells.iter().all(|c| c.ch == ' '));
/// ```
pub fn convert(frame: &FrameBuffer, config: &RenderConfig, ramp: &CharRamp) -> Result<AsciiGrid> {
    let width = config.width;
    let height = target_height(frame.width, frame.height, width);
    log::debug!(
        "Conversion {}×{} → grille {width}×{height}",
        frame.width,
        frame.height
    );

    let resized = resize_frame(frame, width, height)?;
    let mut grid = AsciiGrid::new(width as u16, height as u16);

    for cy in 0..resized.height {
        for cx in 0..resized.width {
            let (r, g, b, a) = resized.pixel(cx, cy);
            let cell = if a == 0 {
                AsciiCell::default()
            } else {
                AsciiCell {
                    ch: ramp.map(resized.luminance(cx, cy)),
                    color: (r, g, b, 255),
                }
            };
            grid.set(cx as u16, cy as u16, cell);
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> FrameBuffer {
        let mut frame = FrameBuffer::new(width, height);
        for px in frame.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        frame
    }

    fn config_with_width(width: u32) -> RenderConfig {
        RenderConfig {
            width,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn grid_dimensions_follow_aspect_ratio() {
        // 200×100 source at width 100 → height = 100 * 0.5 * 0.5 = 25.
        let frame = solid_frame(200, 100, [128, 128, 128, 255]);
        let config = config_with_width(100);
        let ramp = CharRamp::new(&config.charset).unwrap();
        let grid = convert(&frame, &config, &ramp).unwrap();
        assert_eq!((grid.width, grid.height), (100, 25));
    }

    #[test]
    fn uniform_image_yields_uniform_character() {
        let frame = solid_frame(64, 64, [128, 128, 128, 255]);
        let config = config_with_width(32);
        let ramp = CharRamp::new(&config.charset).unwrap();
        let grid = convert(&frame, &config, &ramp).unwrap();
        let first = grid.get(0, 0).ch;
        assert!(grid.cells.iter().all(|c| c.ch == first));
    }

    #[test]
    fn transparent_image_yields_spaces() {
        let frame = FrameBuffer::new(16, 16);
        let config = config_with_width(8);
        let ramp = CharRamp::new(&config.charset).unwrap();
        let grid = convert(&frame, &config, &ramp).unwrap();
        for cell in &grid.cells {
            assert_eq!(cell.ch, ' ');
            assert_eq!(cell.color, (255, 255, 255, 0));
        }
    }

    #[test]
    fn pure_red_scenario() {
        // 4×2 opaque red at width 4 → 4×1 grid, ramp char for luminance 76.
        let frame = solid_frame(4, 2, [255, 0, 0, 255]);
        let config = config_with_width(4);
        let ramp = CharRamp::new(&config.charset).unwrap();
        let grid = convert(&frame, &config, &ramp).unwrap();
        assert_eq!((grid.width, grid.height), (4, 1));
        for cell in &grid.cells {
            assert_eq!(cell.ch, '8');
            assert_eq!(cell.color, (255, 0, 0, 255));
        }
    }

    #[test]
    fn opaque_cells_force_full_alpha() {
        // Semi-transparent source pixels come out opaque in the grid.
        let frame = solid_frame(4, 4, [10, 20, 30, 128]);
        let config = config_with_width(4);
        let ramp = CharRamp::new(&config.charset).unwrap();
        let grid = convert(&frame, &config, &ramp).unwrap();
        for cell in &grid.cells {
            assert_eq!(cell.color.3, 255);
        }
    }

    #[test]
    fn height_never_drops_below_one() {
        assert_eq!(target_height(1000, 1, 10), 1);
    }
}
