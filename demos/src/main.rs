//! Headless scatterplot session
//!
//! Loads a point file (or a random cloud), batches it and replays a short
//! scripted controller session: grab with the right hand, drag, stretch with
//! both hands, then let go. Progress is reported through `tracing`.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scatterplot_core::Point3f;
use scatterplot_interaction::{HandSample, InputSnapshot};
use scatterplot_io::Delimiter;
use scatterplot_scene::{Scatterplot, ScatterplotConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "headless_session")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Delimited point file; a random cloud is used when omitted
    file: Option<PathBuf>,

    /// First line of the file holds the axis names
    #[arg(long)]
    header: bool,

    /// Field separator
    #[arg(short, long, default_value_t = ' ')]
    separator: char,

    /// Number of random points when no file is given
    #[arg(short = 'n', long, default_value_t = 10_000)]
    points: usize,

    /// Maximum vertices per mesh chunk
    #[arg(long, default_value_t = default_budget())]
    budget: usize,

    /// Load on a background thread
    #[arg(long)]
    background: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn default_budget() -> usize {
    ScatterplotConfig::default().vertex_budget
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

fn random_cloud(count: usize) -> Vec<Point3f> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| Point3f::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

fn hand(x: f32, y: f32, z: f32) -> HandSample {
    HandSample::at(Point3f::new(x, y, z))
}

/// Grab, drag, stretch to twice the size, release
fn script() -> Vec<InputSnapshot> {
    let mut frames = vec![InputSnapshot::new(
        hand(-0.3, 1.2, 0.4),
        hand(0.3, 1.2, 0.4).pressed(),
    )];
    for step in 1..=30 {
        let t = step as f32 / 30.0;
        frames.push(InputSnapshot::new(
            hand(-0.3, 1.2, 0.4),
            hand(0.3, 1.2 + 0.2 * t, 0.4 - 0.2 * t),
        ));
    }
    frames.push(InputSnapshot::new(
        hand(-0.3, 1.4, 0.2).pressed(),
        hand(0.3, 1.4, 0.2),
    ));
    for step in 1..=30 {
        let spread = 0.3 + 0.3 * step as f32 / 30.0;
        frames.push(InputSnapshot::new(hand(-spread, 1.4, 0.2), hand(spread, 1.4, 0.2)));
    }
    // Controller briefly out of view
    frames.push(InputSnapshot::new(hand(-0.6, 1.4, 0.2).untracked(), hand(0.6, 1.4, 0.2)));
    frames.push(InputSnapshot::new(
        hand(-0.6, 1.4, 0.2).released(),
        hand(0.6, 1.4, 0.2).released(),
    ));
    frames
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = ScatterplotConfig::default()
        .with_header(args.header)
        .with_separator(Delimiter::from(args.separator))
        .with_vertex_budget(args.budget);
    if let Some(path) = &args.file {
        config.points_path = path.clone();
    }
    let mut plot = Scatterplot::new(config).context("invalid scatterplot settings")?;

    match &args.file {
        Some(path) if args.background => {
            plot.begin_load()?;
            while !plot.poll_load()? {
                std::thread::yield_now();
            }
            info!(path = %path.display(), "background load finished");
        }
        Some(path) => plot
            .start()
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => plot.populate_points(&random_cloud(args.points))?,
    }

    if !plot.diagnostics().is_empty() {
        warn!(count = plot.diagnostics().len(), "some lines were recorded as the origin");
    }
    info!(
        chunks = plot.container().chunks().len(),
        vertices = plot.container().vertex_count(),
        labels = plot.labels().len(),
        axes = ?plot.axis_names(),
        "scatterplot ready"
    );

    let dt = 1.0 / 90.0;
    for (frame, input) in script().iter().enumerate() {
        let effects = plot.tick(dt, input);
        if !effects.is_empty() {
            info!(frame, ?effects, "controller effects");
        }
    }

    let container = plot.container();
    info!(
        position = ?container.position,
        scale = ?container.scale,
        state = ?plot.controller().kind(),
        "session finished"
    );

    plot.teardown();
    Ok(())
}
