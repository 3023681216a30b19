//! Transition planning.
//!
//! A transition has a synchronous phase and a deferred completion. This
//! module decides what both phases do; it performs none of it. The
//! runtime executes the returned [`TransitionAction`]s in order.
//!
//! ```text
//! Idle ──begin──► Transitioning ──(delay)──complete──► Idle
//!   ▲                  │
//!   └── no slides ─────┘   (flag cleared immediately)
//! ```
//!
//! The transition flag is set before normalization and cleared only by
//! [`complete`], or immediately when there are no slides so the carousel
//! can never get stuck.

use carousel_types::{CarouselError, SlideIndex};

use crate::normalize::normalize;
use crate::state::CarouselState;

/// What happened to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition was accepted and committed.
    Started {
        /// Position before the transition.
        from: SlideIndex,
        /// Normalized target position.
        to: SlideIndex,
    },
    /// Another transition was running; nothing changed.
    Dropped {
        /// The raw requested index.
        requested: i64,
    },
    /// The carousel has no slides; nothing changed.
    NoSlides {
        /// The raw requested index.
        requested: i64,
    },
}

impl TransitionOutcome {
    /// Check if the request started a transition.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    /// The recoverable error behind a rejected request, if any.
    pub fn error(&self) -> Option<CarouselError> {
        match *self {
            Self::Started { .. } => None,
            Self::Dropped { requested } => Some(CarouselError::TransitionInProgress { requested }),
            Self::NoSlides { .. } => Some(CarouselError::NoSlidesFound),
        }
    }
}

/// Steps for the runtime to execute, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    /// Publish `Start { from, to }`.
    EmitStart {
        /// Position before the transition.
        from: SlideIndex,
        /// Normalized target position.
        to: SlideIndex,
    },
    /// Conceal every slide and every dot.
    ConcealAll,
    /// Commit `index` into the carousel state.
    Commit {
        /// Position to commit.
        index: SlideIndex,
    },
    /// Reveal the slide and dot at `index`.
    Reveal {
        /// Position to reveal.
        index: SlideIndex,
    },
    /// Schedule the deferred completion for `index`.
    ScheduleCompletion {
        /// Position the transition ends on.
        index: SlideIndex,
    },
    /// Publish `Complete { index }`.
    EmitComplete {
        /// Position the transition ended on.
        index: SlideIndex,
    },
}

/// Start a transition towards `requested`.
///
/// Does not mutate the position; `Commit` is one of the returned actions.
pub fn begin(state: &mut CarouselState, requested: i64) -> (TransitionOutcome, Vec<TransitionAction>) {
    if state.is_transitioning() {
        return (TransitionOutcome::Dropped { requested }, vec![]);
    }
    state.set_transitioning(true);

    let to = match normalize(requested, state.total()) {
        Ok(index) => index,
        Err(_) => {
            state.set_transitioning(false);
            return (TransitionOutcome::NoSlides { requested }, vec![]);
        }
    };
    let from = state.current();

    (
        TransitionOutcome::Started { from, to },
        vec![
            TransitionAction::EmitStart { from, to },
            TransitionAction::ConcealAll,
            TransitionAction::Commit { index: to },
            TransitionAction::Reveal { index: to },
            TransitionAction::ScheduleCompletion { index: to },
        ],
    )
}

/// Finish the transition that ended on `index`.
///
/// Returns no actions if no transition was running.
pub fn complete(state: &mut CarouselState, index: SlideIndex) -> Vec<TransitionAction> {
    if !state.is_transitioning() {
        return vec![];
    }
    state.set_transitioning(false);
    vec![TransitionAction::EmitComplete { index }]
}
