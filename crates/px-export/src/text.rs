use std::path::Path;

use anyhow::{Context, Result};
use px_core::frame::AsciiGrid;

/// Rend la grille en texte : une ligne par rangée, newline après chacune,
/// y compris la dernière.
///
/// # Example
/// ```
/// use px_core::frame::{AsciiGrid, AsciiCell};
/// use px_export::text::render_text;
///
/// let mut grid = AsciiGrid::new(2, 2);
/// grid.set(0, 0, AsciiCell { ch: '@', color: (0, 0, 0, 255) });
/// assert_eq!(render_text(&grid), "@ \n  \n");
/// ```
#[must_use]
pub fn render_text(grid: &AsciiGrid) -> String {
    let mut out = String::with_capacity((grid.width as usize + 1) * grid.height as usize);
    for row in grid.rows() {
        for cell in row {
            out.push(cell.ch);
        }
        out.push('\n');
    }
    out
}

/// Écrit le rendu texte de la grille dans un fichier.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_text_file(grid: &AsciiGrid, path: &Path) -> Result<()> {
    std::fs::write(path, render_text(grid))
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}
