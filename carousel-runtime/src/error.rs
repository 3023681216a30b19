//! Error types for carousel-runtime.

use thiserror::Error;

/// Errors raised while assembling a carousel.
///
/// Navigation itself never fails; see [`carousel_core::TransitionOutcome`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Created outside a tokio runtime; timers cannot be scheduled.
    #[error("no tokio runtime available to schedule carousel timers")]
    NoRuntime,

    /// The surface reported more slides than a slide index can address.
    #[error("too many slides: {0}")]
    TooManySlides(usize),
}
