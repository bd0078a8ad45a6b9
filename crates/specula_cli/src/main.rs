use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use specula_core::{load_scene, write_image, FrameBuffer, OutputFormat, Pixel};
use specula_renderer::{render_into, RenderConfig, DEFAULT_MAX_DEPTH};

/// Render a scene description file to an image.
#[derive(Debug, Parser)]
#[command(name = "specula", version, about)]
struct Cli {
    /// Output image width in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Output image height in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Scene description file
    input: PathBuf,

    /// Output image; `.ppm` writes a binary pixmap, other extensions pick the format
    output: PathBuf,

    /// Maximum number of reflection bounce levels
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Render on a single thread
    #[arg(long)]
    serial: bool,

    /// Write plain-text PPM (P3) regardless of the output extension
    #[arg(long)]
    ascii: bool,

    /// Background color for pixels that hit nothing, as R,G,B in 0..=255
    #[arg(long, value_parser = parse_background, default_value = "0,0,0")]
    background: Pixel,

    /// Override the camera's viewport distance
    #[arg(long)]
    viewport_distance: Option<f32>,
}

fn parse_background(s: &str) -> Result<Pixel, String> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|e| format!("{:?}: {}", c.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok(Pixel::new(r, g, b)),
        _ => Err(format!("expected R,G,B, got {} component(s)", channels.len())),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut scene = load_scene(&cli.input)
        .with_context(|| format!("Failed to load scene {}", cli.input.display()))?;
    scene.camera.set_resolution(cli.width, cli.height);
    if let Some(distance) = cli.viewport_distance {
        scene.camera.viewport_distance = distance;
    }

    log::info!(
        "Loaded {}: {} primitives, {} lights",
        cli.input.display(),
        scene.primitive_count(),
        scene.light_count()
    );

    let config = RenderConfig::default()
        .with_max_depth(cli.max_depth)
        .with_parallel(!cli.serial);

    let mut frame = FrameBuffer::new(cli.width, cli.height, cli.background);
    render_into(&scene, &config, &mut frame.pixels).context("Render failed")?;

    let format = if cli.ascii {
        OutputFormat::Ppm { ascii: true }
    } else {
        OutputFormat::from_path(&cli.output)
            .with_context(|| format!("Cannot pick an image format for {}", cli.output.display()))?
    };
    write_image(&cli.output, &frame, format)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    log::info!("Saved {}", cli.output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(Cli::parse())
}
