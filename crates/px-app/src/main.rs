use anyhow::Result;
use clap::Parser;
use px_core::charset::CharRamp;
use px_core::config::RenderConfig;
use px_core::error::CoreError;

pub mod cli;
pub mod paths;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    // 3. Dérouler le pipeline ; toute erreur sort avec le code 1.
    run(&cli)
}

/// Pipeline complet : chargement → conversion → texte → PNG.
fn run(cli: &cli::Cli) -> Result<()> {
    let input = cli.validate_input()?;

    let mut config = resolve_config(cli)?;
    cli.apply_to(&mut config)?;
    config.validate()?;

    let ramp = CharRamp::new(&config.charset)?;
    let frame = px_source::load_image(input)?;
    let grid = px_ascii::convert(&frame, &config, &ramp)?;

    let (txt_path, png_path) = paths::output_paths(input);

    px_export::write_text_file(&grid, &txt_path)?;

    let background =
        px_export::resolve_background(config.bg_mode, config.bg_opacity, &grid.cells);
    let rasterizer = px_export::Rasterizer::load(&config, &config.charset);
    let canvas = rasterizer.render(&grid, background);
    px_export::save_png(&canvas, &png_path)?;

    log::info!("ASCII art écrit dans {}", txt_path.display());
    log::info!("PNG coloré écrit dans {}", png_path.display());
    Ok(())
}

/// Resolve config: optional TOML file over defaults.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    match &cli.config {
        Some(path) if path.exists() => px_core::config::load_config(path),
        Some(path) => Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into()),
        None => Ok(RenderConfig::default()),
    }
}
