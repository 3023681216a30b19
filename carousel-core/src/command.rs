//! Navigation commands.
//!
//! Two request shapes exist: move by a relative offset, or jump to an
//! absolute position. Both resolve to a raw requested index and hand it to
//! a [`Navigator`], which normalizes it.

use std::fmt;

use carousel_types::SlideIndex;

use crate::transition::TransitionOutcome;

/// Something that can run transitions.
pub trait Navigator {
    /// Active slide.
    fn current_index(&self) -> SlideIndex;

    /// Attempt a transition towards a raw, un-normalized index.
    fn execute_transition(&self, requested: i64) -> TransitionOutcome;
}

/// An immutable navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Move relative to the slide active at execution time.
    ByOffset(i64),
    /// Jump to a 1-based position. Out-of-range values are normalized.
    ToIndex(i64),
}

impl NavigationCommand {
    /// Raw index this command requests when the active slide is `current`.
    ///
    /// Plain addition; normalization happens in the transition.
    pub fn resolve(&self, current: SlideIndex) -> i64 {
        match *self {
            Self::ByOffset(offset) => current.as_request().saturating_add(offset),
            Self::ToIndex(target) => target,
        }
    }

    /// Run the command against `navigator`.
    ///
    /// Every call is an independent transition attempt.
    pub fn execute<N: Navigator + ?Sized>(&self, navigator: &N) -> TransitionOutcome {
        let requested = self.resolve(navigator.current_index());
        navigator.execute_transition(requested)
    }
}

impl fmt::Display for NavigationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByOffset(offset) => write!(f, "by_offset({:+})", offset),
            Self::ToIndex(target) => write!(f, "to_index({})", target),
        }
    }
}

/// Runs commands and keeps an append-only history of them.
///
/// Nothing is deduplicated or coalesced.
#[derive(Debug, Clone, Default)]
pub struct CommandInvoker {
    history: Vec<NavigationCommand>,
}

impl CommandInvoker {
    /// Create an invoker with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `command` to the history without running it.
    pub fn record(&mut self, command: NavigationCommand) {
        self.history.push(command);
    }

    /// Record and run `command`.
    pub fn execute<N: Navigator + ?Sized>(
        &mut self,
        command: NavigationCommand,
        navigator: &N,
    ) -> TransitionOutcome {
        self.record(command);
        command.execute(navigator)
    }

    /// Every command executed so far, oldest first.
    pub fn history(&self) -> &[NavigationCommand] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CarouselState;
    use crate::transition;
    use std::cell::RefCell;

    fn idx(n: u32) -> SlideIndex {
        SlideIndex::new(n).unwrap()
    }

    /// Commits synchronously and completes immediately.
    struct InstantNavigator {
        state: RefCell<CarouselState>,
        requests: RefCell<Vec<i64>>,
    }

    impl InstantNavigator {
        fn new(total: u32) -> Self {
            Self {
                state: RefCell::new(CarouselState::with_total(total)),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Navigator for InstantNavigator {
        fn current_index(&self) -> SlideIndex {
            self.state.borrow().current()
        }

        fn execute_transition(&self, requested: i64) -> TransitionOutcome {
            self.requests.borrow_mut().push(requested);
            let mut state = self.state.borrow_mut();
            let (outcome, _) = transition::begin(&mut state, requested);
            if let TransitionOutcome::Started { to, .. } = outcome {
                state.commit(to).deliver();
                transition::complete(&mut state, to);
            }
            outcome
        }
    }

    #[test]
    fn offset_is_added_without_normalizing() {
        assert_eq!(NavigationCommand::ByOffset(1).resolve(idx(3)), 4);
        assert_eq!(NavigationCommand::ByOffset(-1).resolve(idx(1)), 0);
        assert_eq!(NavigationCommand::ByOffset(i64::MAX).resolve(idx(2)), i64::MAX);
        assert_eq!(NavigationCommand::ToIndex(5).resolve(idx(2)), 5);
    }

    #[test]
    fn offset_reads_current_at_execution_time() {
        let nav = InstantNavigator::new(5);
        let forward = NavigationCommand::ByOffset(1);

        forward.execute(&nav);
        forward.execute(&nav);

        assert_eq!(*nav.requests.borrow(), vec![2, 3]);
        assert_eq!(nav.current_index(), idx(3));
    }

    #[test]
    fn to_index_passes_target_through() {
        let nav = InstantNavigator::new(3);

        let outcome = NavigationCommand::ToIndex(5).execute(&nav);

        assert_eq!(
            outcome,
            TransitionOutcome::Started {
                from: idx(1),
                to: idx(1)
            }
        );
        assert_eq!(*nav.requests.borrow(), vec![5]);
    }

    #[test]
    fn invoker_records_every_command() {
        let nav = InstantNavigator::new(3);
        let mut invoker = CommandInvoker::new();

        invoker.execute(NavigationCommand::ByOffset(1), &nav);
        invoker.execute(NavigationCommand::ByOffset(1), &nav);
        invoker.execute(NavigationCommand::ToIndex(1), &nav);

        assert_eq!(
            invoker.history(),
            &[
                NavigationCommand::ByOffset(1),
                NavigationCommand::ByOffset(1),
                NavigationCommand::ToIndex(1),
            ]
        );
        assert_eq!(nav.current_index(), idx(1));
    }

    #[test]
    fn display_format() {
        assert_eq!(NavigationCommand::ByOffset(1).to_string(), "by_offset(+1)");
        assert_eq!(NavigationCommand::ByOffset(-2).to_string(), "by_offset(-2)");
        assert_eq!(NavigationCommand::ToIndex(3).to_string(), "to_index(3)");
    }
}
