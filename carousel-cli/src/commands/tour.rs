//! Run a scripted sequence of navigation steps.

use anyhow::{bail, Context, Result};
use std::str::FromStr;

use carousel_runtime::{Carousel, CarouselConfig, TransitionOutcome};

use super::print_state;
use crate::terminal::TerminalSurface;

/// One navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Relative move.
    Offset(i64),
    /// Absolute jump.
    GoTo(i64),
    /// Absolute jump through the deprecated entry point.
    Legacy(i64),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let step = match s {
            "next" => Step::Offset(1),
            "prev" => Step::Offset(-1),
            _ => {
                if let Some(n) = s.strip_prefix("goto=") {
                    Step::GoTo(n.parse().with_context(|| format!("Invalid index in '{}'", s))?)
                } else if let Some(n) = s.strip_prefix("legacy=") {
                    Step::Legacy(n.parse().with_context(|| format!("Invalid index in '{}'", s))?)
                } else if s.starts_with('+') || s.starts_with('-') {
                    Step::Offset(s.parse().with_context(|| format!("Invalid offset '{}'", s))?)
                } else {
                    bail!("Unknown step '{}' (expected next, prev, +N, -N, goto=N, legacy=N)", s);
                }
            }
        };
        Ok(step)
    }
}

/// Run the tour command.
pub async fn run(surface: TerminalSurface, config: CarouselConfig, steps: &[Step]) -> Result<()> {
    let carousel = Carousel::new(surface, config).context("Failed to create carousel")?;
    carousel.settle().await;

    for step in steps {
        #[allow(deprecated)]
        let outcome = match *step {
            Step::Offset(offset) => carousel.change_slide(offset),
            Step::GoTo(index) => carousel.go_to_slide(index),
            Step::Legacy(index) => carousel.current_slide(index),
        };
        if let TransitionOutcome::NoSlides { .. } = outcome {
            println!("no slides to show");
        }
        carousel.settle().await;
    }

    print_state(&carousel.shutdown().await)
}
