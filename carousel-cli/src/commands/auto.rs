//! Let auto-advance run for a fixed duration.

use anyhow::{Context, Result};
use std::time::Duration;

use carousel_runtime::{Carousel, CarouselConfig};

use super::print_state;
use crate::terminal::TerminalSurface;

/// Run the auto command.
pub async fn run(surface: TerminalSurface, config: CarouselConfig, duration: Duration) -> Result<()> {
    let interval = config.auto_advance_interval();
    let carousel = Carousel::new(surface, config).context("Failed to create carousel")?;

    carousel.enable_auto_advance();
    tracing::info!(?interval, ?duration, "running auto-advance");
    tokio::time::sleep(duration).await;

    let ticks = carousel.auto_advance_ticks();
    let state = carousel.shutdown().await;
    println!("{} auto-advance ticks", ticks);
    print_state(&state)
}
