use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracebrush::chunk::{self, ChunkGrid, CHUNK_SIZE};
use tracebrush::color_cluster::{group_colors, ClusterMode, GroupingOptions, Rgb};
use tracebrush::error::InputError;
use tracebrush::locate::locate_targets;
use tracebrush::models::{CalibrationRect, ChunkGeometry, DrawConfig, MAX_TOLERANCE};

#[derive(Parser)]
#[command(name = "tracebrush")]
#[command(about = "Color-guided drawing automation for pixel canvases")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group an image's colors into perceptual families
    Colors {
        /// Reference image path
        image: PathBuf,

        /// Perceptual neighborhood radius (overrides config)
        #[arg(long)]
        sensitivity: Option<f32>,

        /// Force a fixed number of groups instead of density clustering
        #[arg(long)]
        groups: Option<usize>,
    },
    /// Show the chunk grid and the screen targets for one chunk
    Plan {
        /// Reference image path
        image: PathBuf,

        /// Chunk index (row-major)
        #[arg(long, default_value_t = 0)]
        chunk: usize,

        /// Calibration rectangle as "X,Y,WxH" (e.g. "100,100,640x640")
        #[arg(long)]
        rect: String,

        /// Target colors as comma-separated hex RGB (e.g. "#FF0000,#00FF00")
        #[arg(long)]
        colors: String,

        /// Per-channel matching tolerance (overrides config)
        #[arg(long)]
        tolerance: Option<u8>,
    },
    /// Draw one chunk's targets on the live screen
    Draw {
        /// Reference image path
        image: PathBuf,

        /// Chunk index (row-major)
        #[arg(long, default_value_t = 0)]
        chunk: usize,

        /// Calibration rectangle as "X,Y,WxH"
        #[arg(long)]
        rect: String,

        /// Target colors as comma-separated hex RGB
        #[arg(long)]
        colors: String,

        /// Per-channel matching tolerance (overrides config)
        #[arg(long)]
        tolerance: Option<u8>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracebrush=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let config = DrawConfig::load_or_default(cli.config.as_deref());
    config.validate()?;

    match cli.command {
        Commands::Colors {
            image,
            sensitivity,
            groups,
        } => run_colors_command(&image, &config, sensitivity, groups),
        Commands::Plan {
            image,
            chunk,
            rect,
            colors,
            tolerance,
        } => run_plan_command(&image, chunk, &rect, &colors, tolerance, &config),
        Commands::Draw {
            image,
            chunk,
            rect,
            colors,
            tolerance,
        } => run_draw_command(&image, chunk, &rect, &colors, tolerance, &config),
    }
}

fn run_colors_command(
    image: &PathBuf,
    config: &DrawConfig,
    sensitivity: Option<f32>,
    groups: Option<usize>,
) -> anyhow::Result<()> {
    let (pixels, width, height) = chunk::load_pixels(image)?;

    let mode = match groups {
        Some(count) => ClusterMode::Fixed { groups: count },
        None => ClusterMode::Density {
            radius: sensitivity.unwrap_or(config.sensitivity),
        },
    };
    let options = GroupingOptions {
        mode,
        ..GroupingOptions::default()
    };
    let grouped = group_colors(&pixels, width, height, &options);

    println!("{} ({}x{}):", image.display(), width, height);
    for group in &grouped {
        println!(
            "  {} - {} pixels, {} colors, representative {}",
            group.label,
            group.pixel_count,
            group.colors.len(),
            group.representative
        );
        for color in &group.colors {
            println!("    {color}");
        }
    }
    Ok(())
}

fn run_plan_command(
    image: &PathBuf,
    chunk_index: usize,
    rect: &str,
    colors: &str,
    tolerance: Option<u8>,
    config: &DrawConfig,
) -> anyhow::Result<()> {
    let (tile, geometry) = prepare_chunk(image, chunk_index, rect)?;
    let targets = parse_colors(colors)?;
    let tolerance = resolve_tolerance(tolerance, config)?;

    let points = locate_targets(&tile, &targets, tolerance, &geometry);
    println!(
        "Chunk {} ({}x{} px, scale {:.2}): {} targets",
        chunk_index,
        tile.width,
        tile.height,
        geometry.pixel_scale,
        points.len()
    );
    for point in &points {
        println!("  ({}, {})", point.x, point.y);
    }
    Ok(())
}

#[cfg(feature = "desktop")]
fn run_draw_command(
    image: &PathBuf,
    chunk_index: usize,
    rect: &str,
    colors: &str,
    tolerance: Option<u8>,
    config: &DrawConfig,
) -> anyhow::Result<()> {
    use std::sync::mpsc;

    use tracebrush::backend::{DesktopPointer, DesktopProbe};
    use tracebrush::engine::{DrawEngine, DrawEvent, DrawPlan, RunOutcome};

    let (tile, geometry) = prepare_chunk(image, chunk_index, rect)?;
    let targets = parse_colors(colors)?;
    let match_tolerance = resolve_tolerance(tolerance, config)?;

    let points = locate_targets(&tile, &targets, match_tolerance, &geometry);
    let plan = DrawPlan {
        targets: points,
        palette: targets.clone(),
        verify_tolerance: config.effective_verify_tolerance(),
        action_delay: config.action_delay(),
        priming_click: config.priming_click,
    };

    let (tx, rx) = mpsc::channel();
    let mut engine = DrawEngine::new();
    engine.start(
        plan,
        Box::new(DesktopPointer::new()?),
        Box::new(DesktopProbe::new()),
        tx,
    )?;

    for event in rx {
        match event {
            DrawEvent::Started { total } => println!("Drawing {total} targets"),
            DrawEvent::TargetDrawn { point, .. } => {
                println!("  drawn ({}, {})", point.x, point.y)
            }
            DrawEvent::TargetAbandoned {
                point, attempts, ..
            } => println!(
                "  abandoned ({}, {}) after {attempts} attempts",
                point.x, point.y
            ),
            DrawEvent::Progress { completed, total } => {
                println!("  {completed}/{total}")
            }
            DrawEvent::Finished(outcome) => {
                match outcome {
                    RunOutcome::Completed => println!("Done"),
                    RunOutcome::Cancelled => println!("Cancelled"),
                    RunOutcome::Failed(msg) => println!("Failed: {msg}"),
                }
                break;
            }
        }
    }

    engine.wait()?;
    Ok(())
}

#[cfg(not(feature = "desktop"))]
fn run_draw_command(
    _image: &PathBuf,
    _chunk_index: usize,
    _rect: &str,
    _colors: &str,
    _tolerance: Option<u8>,
    _config: &DrawConfig,
) -> anyhow::Result<()> {
    anyhow::bail!("This build has no desktop backends; rebuild with --features desktop")
}

/// Load the image, build the grid, and fit the requested chunk into the
/// calibration rect.
fn prepare_chunk(
    image: &PathBuf,
    chunk_index: usize,
    rect: &str,
) -> anyhow::Result<(chunk::Tile, ChunkGeometry)> {
    let (pixels, width, height) = chunk::load_pixels(image)?;
    let grid = ChunkGrid::new(width, height)?;
    tracing::info!(
        chunks_x = grid.chunks_x(),
        chunks_y = grid.chunks_y(),
        chunk_size = CHUNK_SIZE,
        "Image divided into chunks"
    );

    let tile_rect = grid.tile_rect(chunk_index)?;
    let tile = chunk::extract_tile(&pixels, width, tile_rect);

    let rect = parse_rect(rect)?;
    let geometry = ChunkGeometry::fit(&rect, tile.width, tile.height)?;
    Ok((tile, geometry))
}

/// Apply the `--tolerance` override, holding it to the same bound the
/// config path enforces.
fn resolve_tolerance(tolerance: Option<u8>, config: &DrawConfig) -> Result<u8, InputError> {
    match tolerance {
        Some(t) if t > MAX_TOLERANCE => Err(InputError::ToleranceOutOfRange(t)),
        Some(t) => Ok(t),
        None => Ok(config.match_tolerance),
    }
}

/// Parse a calibration rectangle from "X,Y,WxH".
fn parse_rect(s: &str) -> anyhow::Result<CalibrationRect> {
    let invalid = || anyhow::anyhow!("Invalid rect '{s}', expected \"X,Y,WxH\"");

    let mut parts = s.split(',');
    let x: i32 = parts.next().ok_or_else(invalid)?.trim().parse()?;
    let y: i32 = parts.next().ok_or_else(invalid)?.trim().parse()?;
    let size = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    let (w, h) = size.split_once('x').ok_or_else(invalid)?;
    Ok(CalibrationRect::new(
        x,
        y,
        w.trim().parse()?,
        h.trim().parse()?,
    ))
}

/// Parse a comma-separated list of hex colors.
fn parse_colors(s: &str) -> anyhow::Result<Vec<Rgb>> {
    let colors = s
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().parse::<Rgb>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(tracebrush::error::InputError::from)?;
    if colors.is_empty() {
        return Err(tracebrush::error::InputError::EmptyColorSelection.into());
    }
    Ok(colors)
}
