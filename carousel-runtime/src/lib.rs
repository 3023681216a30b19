//! # carousel-runtime
//!
//! Async runtime for the carousel, built on tokio.
//!
//! ## Features
//!
//! - **Transition Guard**: at most one transition runs at a time; extra
//!   requests are dropped, never queued
//! - **Deferred Completion**: each transition completes after a fixed delay
//! - **Auto-Advance**: a single periodic timer moving forward
//! - **Surface Abstraction**: pluggable presentation surface (real, mock)
//! - **Pure Core**: planning comes from carousel-core; this crate only
//!   executes it
//!
//! ## Example
//!
//! ```ignore
//! use carousel_runtime::{Carousel, CarouselConfig, MockSurface};
//!
//! let carousel = Carousel::new(MockSurface::new(5), CarouselConfig::default())?;
//! carousel.enable_auto_advance();
//! carousel.go_to_slide(3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod carousel;
pub mod config;
pub mod controller;
pub mod error;
pub mod scheduler;
pub mod surface;

pub use carousel::Carousel;
pub use config::{AutoAdvanceConfig, CarouselConfig, ConfigError, StartupConfig, TransitionConfig};
pub use controller::TransitionController;
pub use error::RuntimeError;
pub use scheduler::{AutoAdvanceScheduler, CommandSink};
pub use surface::{MockSurface, PresentationSurface, SurfaceCall};

pub use carousel_core::{NavigationCommand, SubscriptionId, TransitionOutcome};
pub use carousel_types::{names, ElementKind, SlideIndex, StateSnapshot, TransitionEvent};
