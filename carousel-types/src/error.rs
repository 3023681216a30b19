//! Error types for the carousel.

use thiserror::Error;

use crate::ElementKind;

/// Recoverable failures that can occur while navigating.
///
/// None of these are fatal: the carousel always ends up idle again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The carousel has no slides to navigate.
    #[error("no slides found")]
    NoSlidesFound,

    /// A transition is already running; the request was dropped.
    #[error("transition in progress, dropped request for {requested}")]
    TransitionInProgress {
        /// The raw requested index.
        requested: i64,
    },

    /// The presentation surface has no element at the target position.
    #[error("{kind} not found at position {position}")]
    ElementNotFound {
        /// Which element was addressed.
        kind: ElementKind,
        /// Zero-based presentation position.
        position: usize,
    },

    /// A subscriber failed while handling an event.
    #[error("handler for {event} failed: {reason}")]
    HandlerFailed {
        /// Event name being delivered.
        event: String,
        /// Failure description.
        reason: String,
    },
}

impl CarouselError {
    /// Shorthand for an [`CarouselError::ElementNotFound`].
    pub fn element_not_found(kind: ElementKind, position: usize) -> Self {
        Self::ElementNotFound { kind, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(CarouselError::NoSlidesFound.to_string(), "no slides found");
        assert_eq!(
            CarouselError::element_not_found(ElementKind::Dot, 4).to_string(),
            "dot not found at position 4"
        );
        assert_eq!(
            CarouselError::TransitionInProgress { requested: 3 }.to_string(),
            "transition in progress, dropped request for 3"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CarouselError>();
    }
}
