//! TransitionController - runs transitions against a presentation surface.
//!
//! # Architecture
//!
//! The controller uses the pure planner from carousel-core and interprets
//! the actions it returns:
//!
//! ```text
//! request → transition::begin → [EmitStart, ConcealAll, Commit, Reveal, ScheduleCompletion]
//!                                   ↓          ↓                  ↓          ↓
//!                               notifier    surface            surface   tokio task
//!                                                                            ↓ (delay)
//!                                               transition::complete → [EmitComplete]
//! ```
//!
//! Everything up to `ScheduleCompletion` runs before `execute_transition`
//! returns. Only the return to idle and the `Complete` event are deferred.
//! A scheduled completion is never cancelled.
//!
//! The state lock is never held while event handlers or state observers
//! run, so either may read the state or issue navigation requests (which
//! are dropped while a transition is in progress).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use carousel_core::{
    transition, CarouselState, Navigator, ObserverId, TransitionAction, TransitionNotifier,
    TransitionOutcome,
};
use carousel_types::{CarouselError, ElementKind, SlideIndex, StateSnapshot, TransitionEvent};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::surface::PresentationSurface;

/// A completion waiting for its delay to elapse.
#[derive(Debug)]
struct PendingCompletion {
    id: u64,
    index: SlideIndex,
    handle: JoinHandle<()>,
}

struct ControllerInner<S> {
    state: Mutex<CarouselState>,
    notifier: TransitionNotifier,
    surface: S,
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<PendingCompletion>>,
    next_transition: AtomicU64,
}

/// Orchestrates transitions for one carousel.
///
/// Cheap to clone; clones share the same state.
pub struct TransitionController<S> {
    inner: Arc<ControllerInner<S>>,
}

impl<S> Clone for TransitionController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PresentationSurface + 'static> TransitionController<S> {
    /// Create a controller that completes transitions `delay` after they start.
    ///
    /// Completions are spawned on `runtime`.
    pub fn new(surface: S, state: CarouselState, delay: Duration, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                state: Mutex::new(state),
                notifier: TransitionNotifier::new(),
                surface,
                delay,
                runtime,
                pending: Mutex::new(None),
                next_transition: AtomicU64::new(1),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CarouselState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Option<PendingCompletion>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempt a transition towards a raw requested index.
    ///
    /// Never fails: a request made while another transition runs is
    /// dropped, and a carousel without slides aborts and stays idle. Both
    /// are logged and reported through the returned outcome.
    pub fn execute_transition(&self, requested: i64) -> TransitionOutcome {
        let (outcome, actions) = transition::begin(&mut self.state(), requested);

        match outcome {
            TransitionOutcome::Started { from, to } => {
                tracing::debug!(%from, %to, requested, "transition started");
            }
            TransitionOutcome::Dropped { requested } => {
                tracing::warn!("{}", CarouselError::TransitionInProgress { requested });
            }
            TransitionOutcome::NoSlides { requested } => {
                tracing::warn!(requested, "{}, transition aborted", CarouselError::NoSlidesFound);
            }
        }

        self.apply(actions);
        outcome
    }

    fn apply(&self, actions: Vec<TransitionAction>) {
        let notifier = &self.inner.notifier;
        let surface = &self.inner.surface;

        for action in actions {
            match action {
                TransitionAction::EmitStart { from, to } => {
                    notifier.publish(&TransitionEvent::Start { from, to });
                }
                TransitionAction::ConcealAll => {
                    let count = surface.conceal_all(ElementKind::Slide);
                    notifier.publish(&TransitionEvent::Hidden { count });
                    let count = surface.conceal_all(ElementKind::Dot);
                    notifier.publish(&TransitionEvent::DotsDeactivated { count });
                }
                TransitionAction::Commit { index } => {
                    let notice = self.state().commit(index);
                    notice.deliver();
                }
                TransitionAction::Reveal { index } => {
                    let position = index.zero_based();
                    if surface.reveal_at(ElementKind::Slide, position) {
                        notifier.publish(&TransitionEvent::Shown { index });
                    } else {
                        tracing::error!(
                            %index,
                            "{}",
                            CarouselError::element_not_found(ElementKind::Slide, position)
                        );
                    }
                    if surface.reveal_at(ElementKind::Dot, position) {
                        notifier.publish(&TransitionEvent::DotActivated { index });
                    } else {
                        tracing::error!(
                            %index,
                            "{}",
                            CarouselError::element_not_found(ElementKind::Dot, position)
                        );
                    }
                }
                TransitionAction::ScheduleCompletion { index } => {
                    self.schedule_completion(index);
                }
                TransitionAction::EmitComplete { index } => {
                    notifier.publish(&TransitionEvent::Complete { index });
                }
            }
        }
    }

    fn schedule_completion(&self, index: SlideIndex) {
        let id = self.inner.next_transition.fetch_add(1, Ordering::Relaxed);
        let controller = self.clone();
        let delay = self.inner.delay;

        // Spawn under the lock so a completion that schedules the next one
        // cannot have its entry overwritten by this one.
        let mut pending = self.pending();
        let handle = self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            controller.complete(index);
        });
        *pending = Some(PendingCompletion { id, index, handle });
        drop(pending);

        tracing::trace!(transition = id, %index, ?delay, "completion scheduled");
    }

    fn complete(&self, index: SlideIndex) {
        let actions = transition::complete(&mut self.state(), index);
        if actions.is_empty() {
            tracing::warn!(%index, "completion fired while idle");
            return;
        }
        tracing::debug!(%index, "transition complete");
        self.apply(actions);
    }

    /// Wait until no transition is running.
    ///
    /// Keeps waiting while completions schedule further transitions, for
    /// example a `Complete` handler that navigates.
    pub async fn settle(&self) {
        loop {
            let pending = self.pending().take();
            match pending {
                Some(PendingCompletion { id, index, handle }) => {
                    if let Err(e) = handle.await {
                        tracing::error!(transition = id, %index, "completion task failed: {}", e);
                    }
                }
                // Another thread has begun a transition but not yet
                // scheduled its completion.
                None if self.is_transitioning() => tokio::task::yield_now().await,
                None => break,
            }
        }
    }

    /// Check if a transition is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.state().is_transitioning()
    }

    /// Read-only snapshot of the carousel state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.state().snapshot()
    }

    /// Event notifier transitions publish to.
    pub fn notifier(&self) -> &TransitionNotifier {
        &self.inner.notifier
    }

    /// The presentation surface being driven.
    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    /// Register a state observer, called after every commit.
    pub fn observe_state<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        self.state().observe(Arc::new(observer))
    }

    /// Remove a state observer.
    pub fn unobserve_state(&self, id: ObserverId) -> bool {
        self.state().unobserve(id)
    }
}

impl<S: PresentationSurface + 'static> Navigator for TransitionController<S> {
    fn current_index(&self) -> SlideIndex {
        self.state().current()
    }

    fn execute_transition(&self, requested: i64) -> TransitionOutcome {
        TransitionController::execute_transition(self, requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MockSurface, SurfaceCall};
    use carousel_types::names;

    const DELAY: Duration = Duration::from_millis(300);

    fn idx(n: u32) -> SlideIndex {
        SlideIndex::new(n).unwrap()
    }

    fn controller(slides: usize) -> (TransitionController<MockSurface>, MockSurface) {
        let surface = MockSurface::new(slides);
        let state = CarouselState::with_total(slides as u32);
        let controller =
            TransitionController::new(surface.clone(), state, DELAY, Handle::current());
        (controller, surface)
    }

    fn record_events(controller: &TransitionController<MockSurface>) -> Arc<Mutex<Vec<TransitionEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        for name in names::ALL {
            let sink = Arc::clone(&events);
            controller.notifier().on(name, move |event: &TransitionEvent| {
                sink.lock().unwrap().push(*event);
                Ok(())
            });
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn synchronous_phase_runs_before_return() {
        let (controller, surface) = controller(3);
        let events = record_events(&controller);

        let outcome = controller.execute_transition(2);

        assert_eq!(outcome, TransitionOutcome::Started { from: idx(1), to: idx(2) });
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                TransitionEvent::Start { from: idx(1), to: idx(2) },
                TransitionEvent::Hidden { count: 3 },
                TransitionEvent::DotsDeactivated { count: 3 },
                TransitionEvent::Shown { index: idx(2) },
                TransitionEvent::DotActivated { index: idx(2) },
            ]
        );
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::ConcealAll(ElementKind::Slide),
                SurfaceCall::ConcealAll(ElementKind::Dot),
                SurfaceCall::RevealAt(ElementKind::Slide, 1, true),
                SurfaceCall::RevealAt(ElementKind::Dot, 1, true),
            ]
        );
        assert_eq!(controller.snapshot().current_index, idx(2));
        assert!(controller.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_fires_after_delay() {
        let (controller, _surface) = controller(3);
        let events = record_events(&controller);
        controller.execute_transition(2);

        tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
        assert!(controller.is_transitioning());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!controller.is_transitioning());
        assert_eq!(
            events.lock().unwrap().last(),
            Some(&TransitionEvent::Complete { index: idx(2) })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn request_during_transition_is_dropped() {
        let (controller, surface) = controller(3);
        controller.execute_transition(2);
        surface.clear_calls();

        let outcome = controller.execute_transition(3);

        assert_eq!(outcome, TransitionOutcome::Dropped { requested: 3 });
        assert!(surface.calls().is_empty());
        assert_eq!(controller.snapshot().history, vec![idx(2)]);

        controller.settle().await;
        assert!(controller.execute_transition(3).is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn no_slides_returns_to_idle_without_events() {
        let (controller, surface) = controller(0);
        let events = record_events(&controller);

        let outcome = controller.execute_transition(1);

        assert_eq!(outcome, TransitionOutcome::NoSlides { requested: 1 });
        assert!(!controller.is_transitioning());
        assert!(events.lock().unwrap().is_empty());
        assert!(surface.calls().is_empty());
        assert!(controller.snapshot().history.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_dot_keeps_committed_index() {
        let surface = MockSurface::with_dots(3, 2);
        let controller = TransitionController::new(
            surface.clone(),
            CarouselState::with_total(3),
            DELAY,
            Handle::current(),
        );
        let events = record_events(&controller);

        controller.execute_transition(3);
        controller.settle().await;

        let events = events.lock().unwrap();
        assert!(events.contains(&TransitionEvent::Shown { index: idx(3) }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, TransitionEvent::DotActivated { .. })));
        assert_eq!(controller.snapshot().current_index, idx(3));
        assert!(surface.visible(ElementKind::Dot).is_empty());
        assert!(!controller.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_handler_does_not_affect_transition() {
        let (controller, _surface) = controller(3);
        controller
            .notifier()
            .on(names::TRANSITION_START, |_| Err("subscriber failure".into()));
        controller
            .notifier()
            .on(names::SLIDE_SHOWN, |_| panic!("subscriber panic"));

        let outcome = controller.execute_transition(2);
        controller.settle().await;

        assert!(outcome.is_started());
        assert_eq!(controller.snapshot().current_index, idx(2));
        assert!(!controller.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn handler_may_navigate_reentrantly() {
        let (controller, _surface) = controller(3);
        let nested = controller.clone();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&outcomes);
        controller.notifier().on(names::TRANSITION_START, move |_| {
            sink.lock().unwrap().push(nested.execute_transition(3));
            Ok(())
        });

        controller.execute_transition(2);

        assert_eq!(
            *outcomes.lock().unwrap(),
            vec![TransitionOutcome::Dropped { requested: 3 }]
        );
        assert_eq!(controller.snapshot().current_index, idx(2));
    }

    #[tokio::test(start_paused = true)]
    async fn state_observers_see_commits() {
        let (controller, _surface) = controller(3);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = controller.observe_state(move |snapshot| {
            sink.lock().unwrap().push(snapshot.current_index);
        });

        controller.execute_transition(3);
        controller.settle().await;
        assert!(controller.unobserve_state(id));
        controller.execute_transition(1);

        assert_eq!(*seen.lock().unwrap(), vec![idx(3)]);
    }

    #[tokio::test(start_paused = true)]
    async fn state_observer_may_read_controller() {
        let (controller, _surface) = controller(3);
        let reader = controller.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.observe_state(move |_| {
            let snapshot = reader.snapshot();
            sink.lock()
                .unwrap()
                .push((snapshot.current_index, reader.is_transitioning()));
        });

        controller.execute_transition(2);

        assert_eq!(*seen.lock().unwrap(), vec![(idx(2), true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_for_chained_transitions() {
        let (controller, _surface) = controller(3);
        let chained = controller.clone();
        let remaining = Arc::new(Mutex::new(2));
        let budget = Arc::clone(&remaining);
        controller.notifier().on(names::TRANSITION_COMPLETE, move |_| {
            let mut budget = budget.lock().unwrap();
            if *budget > 0 {
                *budget -= 1;
                let next = chained.snapshot().current_index.as_request() + 1;
                chained.execute_transition(next);
            }
            Ok(())
        });

        controller.execute_transition(2);
        controller.settle().await;

        assert!(!controller.is_transitioning());
        assert_eq!(controller.snapshot().history, vec![idx(2), idx(3), idx(1)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn settle_waits_for_chained_transitions_across_workers() {
        let surface = MockSurface::new(3);
        let controller = TransitionController::new(
            surface,
            CarouselState::with_total(3),
            Duration::ZERO,
            Handle::current(),
        );
        let chained = controller.clone();
        let remaining = Arc::new(Mutex::new(1));
        let budget = Arc::clone(&remaining);
        controller.notifier().on(names::TRANSITION_COMPLETE, move |_| {
            let mut budget = budget.lock().unwrap();
            if *budget > 0 {
                *budget -= 1;
                chained.execute_transition(3);
            }
            Ok(())
        });

        controller.execute_transition(2);
        controller.settle().await;

        assert!(!controller.is_transitioning());
        assert_eq!(controller.snapshot().current_index, idx(3));
    }

    #[tokio::test(start_paused = true)]
    async fn navigator_reads_current_index() {
        let (controller, _surface) = controller(4);
        controller.execute_transition(4);
        controller.settle().await;
        assert_eq!(Navigator::current_index(&controller), idx(4));
    }
}
