//! Carousel state.
//!
//! One authoritative [`CarouselState`] exists per carousel. It is created
//! explicitly by whoever assembles the carousel and handed to the
//! components that need it; there is no global instance.
//!
//! The position only moves through [`CarouselState::commit`], which also
//! appends to the history. Observers are not called from inside `commit`:
//! it returns a [`CommitNotice`] that the caller delivers once it no longer
//! holds whatever lock guards the state.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use carousel_types::{SlideIndex, StateSnapshot};

/// Callback invoked with a snapshot after every commit.
pub type StateObserver = Arc<dyn Fn(&StateSnapshot) + Send + Sync>;

/// Handle returned by [`CarouselState::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Whether a transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No transition running; requests are accepted.
    Idle,
    /// A transition is running; requests are dropped.
    Transitioning,
}

/// Position, slide count, transition flag and history of one carousel.
pub struct CarouselState {
    current: SlideIndex,
    previous: Option<SlideIndex>,
    total: u32,
    transitioning: bool,
    history: Vec<SlideIndex>,
    observers: Vec<(ObserverId, StateObserver)>,
    next_observer: u64,
}

impl CarouselState {
    /// Create a state positioned on the first slide with no slides known yet.
    pub fn new() -> Self {
        Self {
            current: SlideIndex::FIRST,
            previous: None,
            total: 0,
            transitioning: false,
            history: Vec::new(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Create a state for a carousel of `total` slides.
    pub fn with_total(total: u32) -> Self {
        let mut state = Self::new();
        state.set_total(total);
        state
    }

    /// Active slide.
    pub fn current(&self) -> SlideIndex {
        self.current
    }

    /// Slide that was active before the last commit.
    pub fn previous(&self) -> Option<SlideIndex> {
        self.previous
    }

    /// Number of slides.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Set the number of slides. Called once, from slide discovery.
    pub fn set_total(&mut self, total: u32) {
        self.total = total;
    }

    /// Check if a transition is running.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Set or clear the transition flag.
    pub fn set_transitioning(&mut self, transitioning: bool) {
        self.transitioning = transitioning;
    }

    /// Current phase, derived from the transition flag.
    pub fn phase(&self) -> TransitionPhase {
        if self.transitioning {
            TransitionPhase::Transitioning
        } else {
            TransitionPhase::Idle
        }
    }

    /// Copy of every committed position, oldest first.
    pub fn history(&self) -> Vec<SlideIndex> {
        self.history.clone()
    }

    /// Number of committed positions.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Read-only snapshot of the state.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            current_index: self.current,
            previous_index: self.previous,
            total_slides: self.total,
            history: self.history.clone(),
        }
    }

    /// Move to `index`.
    ///
    /// Shifts current into previous and appends to the history. The
    /// observers registered at this point are handed back in the notice.
    pub fn commit(&mut self, index: SlideIndex) -> CommitNotice {
        self.previous = Some(self.current);
        self.current = index;
        self.history.push(index);

        CommitNotice {
            snapshot: self.snapshot(),
            observers: self.observers.clone(),
        }
    }

    /// Register an observer called after every commit.
    pub fn observe(&mut self, observer: StateObserver) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }
}

/// Observers still owed a snapshot after a commit.
#[must_use = "observers only run when the notice is delivered"]
pub struct CommitNotice {
    snapshot: StateSnapshot,
    observers: Vec<(ObserverId, StateObserver)>,
}

impl CommitNotice {
    /// State right after the commit.
    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    /// Call every observer in registration order.
    ///
    /// A panicking observer is logged and skipped.
    pub fn deliver(self) -> StateSnapshot {
        for (id, observer) in &self.observers {
            if catch_unwind(AssertUnwindSafe(|| observer(&self.snapshot))).is_err() {
                tracing::error!(
                    observer = id.0,
                    index = %self.snapshot.current_index,
                    "state observer panicked"
                );
            }
        }
        self.snapshot
    }
}

impl fmt::Debug for CommitNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitNotice")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CarouselState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselState")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("total", &self.total)
            .field("transitioning", &self.transitioning)
            .field("history_len", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
