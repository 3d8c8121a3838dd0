use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use px_core::config::{BgMode, RenderConfig};

/// pixscii — Image vers ASCII art coloré (texte + PNG).
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Chemin vers l'image source (PNG, JPEG, BMP, GIF).
    pub input: Option<PathBuf>,

    /// Largeur de la grille en caractères. Défaut : 100.
    pub quality: Option<String>,

    /// Opacité du fond [0, 255]. Défaut : 255.
    pub opacity: Option<String>,

    /// Fond : "auto", "dark" ou "light" (insensible à la casse). Défaut : auto.
    pub background: Option<String>,

    /// Fichier de configuration TOML optionnel.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Police monospace à utiliser pour le rendu PNG.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Validate that an input path was provided.
    ///
    /// # Errors
    /// Returns a usage error if INPUT is missing, so the process exits
    /// with code 1 rather than clap's own code.
    pub fn validate_input(&self) -> Result<&Path> {
        self.input.as_deref().ok_or_else(|| {
            anyhow::anyhow!("Usage : pixscii INPUT [QUALITY] [OPACITY] [BACKGROUND]")
        })
    }

    /// Applique les arguments positionnels par-dessus la configuration.
    ///
    /// # Errors
    /// Retourne une erreur nommant la valeur fautive si QUALITY ou OPACITY
    /// n'est pas un entier dans sa plage.
    pub fn apply_to(&self, config: &mut RenderConfig) -> Result<()> {
        if let Some(quality) = &self.quality {
            let width: u32 = quality
                .parse()
                .with_context(|| format!("QUALITY invalide : '{quality}' (entier attendu)"))?;
            anyhow::ensure!(width >= 1, "QUALITY invalide : '{quality}' (attendu ≥ 1)");
            config.width = width;
        }

        if let Some(opacity) = &self.opacity {
            config.bg_opacity = opacity.parse().with_context(|| {
                format!("OPACITY invalide : '{opacity}' (entier 0-255 attendu)")
            })?;
        }

        if let Some(background) = &self.background {
            config.bg_mode = parse_bg_mode(background);
        }

        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }

        config.clamp_all();
        Ok(())
    }
}

/// Interprète le mot BACKGROUND, insensible à la casse.
///
/// Tout mot autre que "auto" ou "dark" retombe sur le fond clair, comme
/// l'outil historique ; un mot non reconnu est signalé en warning.
#[must_use]
pub fn parse_bg_mode(word: &str) -> BgMode {
    match word.to_ascii_lowercase().as_str() {
        "auto" => BgMode::Auto,
        "dark" => BgMode::Dark,
        "light" => BgMode::Light,
        other => {
            log::warn!("Fond inconnu '{other}' : fond clair utilisé");
            BgMode::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_a_usage_error() {
        let cli = Cli::default();
        let err = cli.validate_input().unwrap_err();
        assert!(err.to_string().contains("Usage"));
    }

    #[test]
    fn positional_arguments_override_defaults() {
        let cli = Cli::try_parse_from(["pixscii", "photo.png", "60", "128", "dark"]).unwrap();
        let mut config = RenderConfig::default();
        cli.apply_to(&mut config).unwrap();
        assert_eq!(config.width, 60);
        assert_eq!(config.bg_opacity, 128);
        assert_eq!(config.bg_mode, BgMode::Dark);
    }

    #[test]
    fn absent_arguments_keep_defaults() {
        let cli = Cli::try_parse_from(["pixscii", "photo.png"]).unwrap();
        let mut config = RenderConfig::default();
        cli.apply_to(&mut config).unwrap();
        assert_eq!(config.width, 100);
        assert_eq!(config.bg_opacity, 255);
        assert_eq!(config.bg_mode, BgMode::Auto);
    }

    #[test]
    fn bad_quality_names_the_value() {
        let cli = Cli::try_parse_from(["pixscii", "photo.png", "abc"]).unwrap();
        let mut config = RenderConfig::default();
        let err = cli.apply_to(&mut config).unwrap_err();
        assert!(format!("{err:#}").contains("'abc'"));
    }

    #[test]
    fn bad_opacity_names_the_value() {
        let cli = Cli::try_parse_from(["pixscii", "photo.png", "50", "300"]).unwrap();
        let mut config = RenderConfig::default();
        let err = cli.apply_to(&mut config).unwrap_err();
        assert!(format!("{err:#}").contains("'300'"));
    }

    #[test]
    fn zero_quality_is_rejected() {
        let cli = Cli::try_parse_from(["pixscii", "photo.png", "0"]).unwrap();
        let mut config = RenderConfig::default();
        assert!(cli.apply_to(&mut config).is_err());
    }

    #[test]
    fn background_word_is_case_insensitive() {
        assert_eq!(parse_bg_mode("AUTO"), BgMode::Auto);
        assert_eq!(parse_bg_mode("Dark"), BgMode::Dark);
        assert_eq!(parse_bg_mode("LIGHT"), BgMode::Light);
    }

    #[test]
    fn unrecognized_background_falls_through_to_light() {
        assert_eq!(parse_bg_mode("sepia"), BgMode::Light);
    }
}
