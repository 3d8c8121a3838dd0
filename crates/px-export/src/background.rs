use px_ascii::dominant::dominant_color;
use px_core::config::BgMode;
use px_core::frame::{AsciiCell, luma};

/// Résout la couleur de fond des cellules dessinées.
///
/// `Dark` → noir, `Light` → blanc, `Auto` → le contraire de la couleur
/// dominante de la grille : dominante claire (luminance > 127) → fond noir,
/// dominante sombre → fond blanc. L'alpha du résultat est l'opacité
/// configurée.
///
/// Une grille entièrement transparente n'a pas de couleur dominante ; le
/// mode `Auto` retombe alors sur un fond blanc.
///
/// # Example
/// ```
/// use px_core::config::BgMode;
/// use px_core::frame::AsciiCell;
/// use px_export::background::resolve_background;
///
/// let cells = [AsciiCell { ch: '#', color: (250, 250, 250, 255) }];
/// // Dominante claire → fond noir.
/// assert_eq!(resolve_background(BgMode::Auto, 255, &cells), (0, 0, 0, 255));
/// assert_eq!(resolve_background(BgMode::Light, 128, &cells), (255, 255, 255, 128));
/// ```
#[must_use]
pub fn resolve_background(mode: BgMode, opacity: u8, cells: &[AsciiCell]) -> (u8, u8, u8, u8) {
    match mode {
        BgMode::Dark => (0, 0, 0, opacity),
        BgMode::Light => (255, 255, 255, opacity),
        BgMode::Auto => match dominant_color(cells) {
            Some((r, g, b)) if luma(r, g, b) > 127 => (0, 0, 0, opacity),
            Some(_) => (255, 255, 255, opacity),
            None => {
                log::warn!("Grille entièrement transparente : fond clair par défaut");
                (255, 255, 255, opacity)
            }
        },
    }
}
