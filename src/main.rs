use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fekete::measure::{min_distance, riesz_energy};
use fekete::{LogProgress, RelaxConfig, random_unit_points, relax_with};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "fekete")]
#[command(version)]
#[command(about = "Estimate Fekete points on the unit sphere")]
struct Cli {
    /// JSON file with run parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of points
    #[arg(long)]
    points: Option<usize>,

    /// Step coefficient
    #[arg(long)]
    step: Option<f64>,

    /// Iteration budget
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Upper edge of the convergence band
    #[arg(long)]
    tolerance: Option<f64>,

    /// Convergence window size
    #[arg(long)]
    window: Option<usize>,

    /// Random seed for the initial configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Log progress every N iterations (0 disables)
    #[arg(long, default_value = "100")]
    progress_every: usize,

    /// Write the final points and error history as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn relax_config(&self) -> Result<RelaxConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                RelaxConfig::from_json(&json)?
            }
            None => RelaxConfig::default(),
        };
        if let Some(points) = self.points {
            config.points = points;
        }
        if let Some(step) = self.step {
            config.step = step;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = cli.relax_config()?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let initial = random_unit_points(config.points, &mut rng);
    let initial_d_min = min_distance(&initial);
    let initial_energy = riesz_energy(&initial, 1.0);

    let mut progress = LogProgress { every: cli.progress_every };
    let outcome = relax_with(config, Some(initial), &mut rng, &mut progress)?;

    let recorded = outcome.history.recorded();
    info!(
        status = ?outcome.status,
        iterations = outcome.iterations,
        initial_d_min,
        final_d_min = min_distance(&outcome.points),
        initial_energy,
        final_energy = riesz_energy(&outcome.points, 1.0),
        first_error = recorded.first().copied().unwrap_or_default(),
        last_error = recorded.last().copied().unwrap_or_default(),
        "done"
    );

    if let Some(path) = cli.output {
        let json = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "outcome written");
    }

    Ok(())
}
