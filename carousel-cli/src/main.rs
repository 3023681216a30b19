//! # carousel
//!
//! CLI tool for driving a carousel in the terminal.
//!
//! ## Commands
//!
//! - `tour`: Run a scripted sequence of navigation steps
//! - `auto`: Let auto-advance run for a fixed duration
//!
//! ## Example
//!
//! ```bash
//! # Five slides, forward twice, back once, then jump to the last slide
//! carousel --slides 5 tour next next prev goto=5
//!
//! # Auto-advance every 500ms for three seconds
//! carousel --slides 4 auto --duration-ms 3000 --interval-ms 500
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use carousel_runtime::CarouselConfig;

mod commands;
mod terminal;

use commands::{auto, tour};

/// Default configuration file, used when present.
const DEFAULT_CONFIG: &str = "carousel.toml";

/// CLI tool for driving a carousel in the terminal.
#[derive(Parser, Debug)]
#[command(name = "carousel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ./carousel.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of slides
    #[arg(long, global = true, default_value = "3")]
    slides: usize,

    /// Number of dots (default: same as slides)
    #[arg(long, global = true)]
    dots: Option<usize>,

    /// Override the transition delay in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run navigation steps in order, waiting for each to complete
    Tour {
        /// Steps: next, prev, +N, -N, goto=N, legacy=N
        #[arg(required = true, allow_hyphen_values = true)]
        steps: Vec<String>,
    },

    /// Let auto-advance run for a while
    Auto {
        /// How long to run
        #[arg(long, default_value = "10000")]
        duration_ms: u64,

        /// Override the auto-advance interval
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_delay(Duration::from_millis(delay_ms));
    }

    let surface = terminal::TerminalSurface::new(cli.slides, cli.dots.unwrap_or(cli.slides));

    match cli.command {
        Commands::Tour { steps } => {
            let steps = steps
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<tour::Step>>>()?;
            tour::run(surface, config, &steps).await?;
        }
        Commands::Auto {
            duration_ms,
            interval_ms,
        } => {
            if let Some(interval_ms) = interval_ms {
                config = config.with_interval(Duration::from_millis(interval_ms));
            }
            auto::run(surface, config, Duration::from_millis(duration_ms)).await?;
        }
    }

    Ok(())
}

/// Load the explicit config file, else `carousel.toml` if present, else defaults.
fn load_config(path: Option<&Path>) -> Result<CarouselConfig> {
    match path {
        Some(path) => CarouselConfig::from_file(path).context("Failed to load configuration"),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                CarouselConfig::from_file(default).context("Failed to load configuration")
            } else {
                Ok(CarouselConfig::default())
            }
        }
    }
}
