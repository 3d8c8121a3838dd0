use std::path::{Path, PathBuf};

/// Chemins de sortie dérivés du chemin d'entrée, dans le même dossier.
///
/// Les espaces du nom de base sont remplacés par des underscores, puis les
/// suffixes `_ascii.txt` et `_ascii_colored.png` sont ajoutés :
/// `photos/my cat.png` → `photos/my_cat_ascii.txt` et
/// `photos/my_cat_ascii_colored.png`.
#[must_use]
pub fn output_paths(input: &Path) -> (PathBuf, PathBuf) {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .replace(' ', "_");
    (
        dir.join(format!("{stem}_ascii.txt")),
        dir.join(format!("{stem}_ascii_colored.png")),
    )
}
