//! # carousel-types
//!
//! Value types shared by every carousel crate:
//! - [`SlideIndex`], [`ElementKind`] - Positions and element addressing
//! - [`TransitionEvent`] - Events emitted while moving between slides
//! - [`StateSnapshot`] - Read-only view of the carousel position
//! - [`CarouselError`] - Error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod event;
mod index;
mod snapshot;

pub use error::CarouselError;
pub use event::{names, TransitionEvent};
pub use index::{ElementKind, SlideIndex};
pub use snapshot::StateSnapshot;
