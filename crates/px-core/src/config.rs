use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::RAMP_CLASSIC;
use crate::error::CoreError;

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use px_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.width, 100);
/// assert_eq!(config.bg_opacity, 255);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RenderConfig {
    // === Conversion ===
    /// Largeur de la grille en caractères.
    pub width: u32,
    /// Rampe de caractères (du plus dense au plus clair).
    pub charset: String,

    // === Fond ===
    /// Sélection du fond des cellules dessinées.
    pub bg_mode: BgMode,
    /// Opacité du fond [0, 255]. 0 = pas de remplissage.
    pub bg_opacity: u8,

    // === Géométrie des glyphes ===
    /// Largeur d'une cellule glyphe en pixels.
    pub cell_width: u32,
    /// Hauteur d'une cellule glyphe en pixels.
    pub cell_height: u32,
    /// Taille de la police en pixels.
    pub font_px: f32,
    /// Police monospace à charger. None = recherche système puis fallback.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 100,
            charset: RAMP_CLASSIC.to_string(),
            bg_mode: BgMode::Auto,
            bg_opacity: 255,
            cell_width: 8,
            cell_height: 16,
            font_px: 16.0,
            font_path: None,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, 4096);
        self.cell_width = self.cell_width.clamp(1, 64);
        self.cell_height = self.cell_height.clamp(1, 128);
        self.font_px = self.font_px.clamp(4.0, 128.0);
    }

    /// Validate structural constraints that cannot be clamped away.
    ///
    /// # Errors
    /// Retourne [`CoreError::RampTooShort`] si la rampe a moins de
    /// 2 caractères, [`CoreError::Config`] si une dimension est nulle.
    pub fn validate(&self) -> Result<(), CoreError> {
        let ramp_len = self.charset.chars().count();
        if ramp_len < 2 {
            return Err(CoreError::RampTooShort { len: ramp_len });
        }
        if self.width == 0 {
            return Err(CoreError::Config("width doit être ≥ 1".to_string()));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(CoreError::Config(
                "cell_width et cell_height doivent être ≥ 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sélection du fond dessiné derrière chaque glyphe.
///
/// # Example
/// ```
/// use px_core::config::BgMode;
/// let mode = BgMode::default();
/// assert!(matches!(mode, BgMode::Auto));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum BgMode {
    /// Contraste avec la couleur dominante de l'image (noir ou blanc).
    #[default]
    Auto,
    /// Fond noir.
    Dark,
    /// Fond blanc.
    Light,
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: RenderSection,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    width: Option<u32>,
    charset: Option<String>,
    bg_mode: Option<BgMode>,
    bg_opacity: Option<u8>,
    cell_width: Option<u32>,
    cell_height: Option<u32>,
    font_px: Option<f32>,
    font_path: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use px_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("pixscii.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut config = RenderConfig::default();

    let r = file.render;
    if let Some(v) = r.width {
        config.width = v;
    }
    if let Some(v) = r.charset {
        config.charset = v;
    }
    if let Some(v) = r.bg_mode {
        config.bg_mode = v;
    }
    if let Some(v) = r.bg_opacity {
        config.bg_opacity = v;
    }
    if let Some(v) = r.cell_width {
        config.cell_width = v;
    }
    if let Some(v) = r.cell_height {
        config.cell_height = v;
    }
    if let Some(v) = r.font_px {
        config.font_px = v;
    }
    if let Some(v) = r.font_path {
        config.font_path = Some(v);
    }

    config.clamp_all();
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_charset_is_rejected() {
        let config = RenderConfig {
            charset: "@".to_string(),
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn clamp_restores_zero_width() {
        let mut config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        config.clamp_all();
        assert_eq!(config.width, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_merges_over_defaults() {
        let toml_str = "[render]\nwidth = 40\nbg_mode = \"Dark\"\n";
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        let mut config = RenderConfig::default();
        if let Some(v) = file.render.width {
            config.width = v;
        }
        if let Some(v) = file.render.bg_mode {
            config.bg_mode = v;
        }
        assert_eq!(config.width, 40);
        assert_eq!(config.bg_mode, BgMode::Dark);
        // Untouched fields keep their defaults.
        assert_eq!(config.bg_opacity, 255);
        assert_eq!(config.cell_height, 16);
    }
}
