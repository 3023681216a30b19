//! Carousel - the public interface embedding applications use.
//!
//! # Example
//!
//! ```ignore
//! use carousel_runtime::{Carousel, CarouselConfig, MockSurface};
//!
//! let carousel = Carousel::new(MockSurface::new(3), CarouselConfig::default())?;
//! carousel.settle().await; // startup transition to slide 1
//!
//! carousel.change_slide(1);
//! carousel.settle().await;
//! assert_eq!(carousel.get_state().current_index.get(), 2);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use carousel_core::{
    CarouselState, CommandInvoker, EmitReport, HandlerResult, NavigationCommand, ObserverId,
    SubscriptionId, TransitionOutcome,
};
use carousel_types::{StateSnapshot, TransitionEvent};
use tokio::runtime::Handle;

use crate::config::CarouselConfig;
use crate::controller::TransitionController;
use crate::error::RuntimeError;
use crate::scheduler::{AutoAdvanceScheduler, CommandSink};
use crate::surface::PresentationSurface;

/// Runs commands through the invoker and the controller.
struct Navigation<S> {
    controller: TransitionController<S>,
    invoker: Mutex<CommandInvoker>,
}

impl<S> Navigation<S> {
    fn invoker(&self) -> MutexGuard<'_, CommandInvoker> {
        self.invoker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: PresentationSurface + 'static> CommandSink for Navigation<S> {
    fn dispatch(&self, command: NavigationCommand) -> TransitionOutcome {
        // Record, then release the invoker before running: handlers may navigate.
        self.invoker().record(command);
        tracing::debug!(%command, "dispatching navigation command");
        command.execute(&self.controller)
    }
}

/// One carousel instance.
pub struct Carousel<S: PresentationSurface + 'static> {
    navigation: Arc<Navigation<S>>,
    auto_advance: AutoAdvanceScheduler,
}

impl<S: PresentationSurface + 'static> Carousel<S> {
    /// Assemble a carousel over `surface`.
    ///
    /// Counts slides and dots, then runs the startup transition and starts
    /// auto-advance as configured. Must be called inside a tokio runtime.
    pub fn new(surface: S, config: CarouselConfig) -> Result<Self, RuntimeError> {
        let runtime = Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?;

        let slides = surface.discover_slides();
        let dots = surface.discover_dots();
        if slides != dots {
            tracing::warn!(slides, dots, "slide and dot counts differ");
        }
        let total = u32::try_from(slides).map_err(|_| RuntimeError::TooManySlides(slides))?;
        if total == 0 {
            tracing::warn!("no slides found");
        }

        let controller = TransitionController::new(
            surface,
            CarouselState::with_total(total),
            config.transition_delay(),
            runtime.clone(),
        );
        let navigation = Arc::new(Navigation {
            controller,
            invoker: Mutex::new(CommandInvoker::new()),
        });
        let auto_advance = AutoAdvanceScheduler::new(
            Arc::clone(&navigation) as Arc<dyn CommandSink>,
            config.auto_advance_interval(),
            config.auto_advance.step,
            runtime,
        );

        let carousel = Self {
            navigation,
            auto_advance,
        };
        tracing::info!(slides = total, dots, "carousel initialized");

        if config.startup.show_initial {
            carousel
                .controller()
                .execute_transition(config.startup.initial_slide);
        }
        if config.auto_advance.enabled {
            carousel.enable_auto_advance();
        }

        Ok(carousel)
    }

    fn controller(&self) -> &TransitionController<S> {
        &self.navigation.controller
    }

    /// Move `offset` slides from the active one.
    pub fn change_slide(&self, offset: i64) -> TransitionOutcome {
        self.navigation.dispatch(NavigationCommand::ByOffset(offset))
    }

    /// Jump to the 1-based slide `index`.
    pub fn go_to_slide(&self, index: i64) -> TransitionOutcome {
        self.navigation.dispatch(NavigationCommand::ToIndex(index))
    }

    /// Old name for [`Carousel::go_to_slide`].
    #[deprecated(note = "use `go_to_slide`")]
    pub fn current_slide(&self, index: i64) -> TransitionOutcome {
        tracing::warn!(index, "current_slide is deprecated, use go_to_slide");
        self.go_to_slide(index)
    }

    /// Read-only snapshot of position, slide count and history.
    pub fn get_state(&self) -> StateSnapshot {
        self.controller().snapshot()
    }

    /// Check if a transition is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.controller().is_transitioning()
    }

    /// Start advancing automatically, replacing any running timer.
    pub fn enable_auto_advance(&self) {
        self.auto_advance.start();
    }

    /// Stop advancing automatically. Safe to call when not running.
    pub fn disable_auto_advance(&self) {
        self.auto_advance.stop();
    }

    /// Check if auto-advance is running.
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_running()
    }

    /// Auto-advance ticks fired so far.
    pub fn auto_advance_ticks(&self) -> u64 {
        self.auto_advance.ticks()
    }

    /// Subscribe to a transition event by name.
    pub fn on<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&TransitionEvent) -> HandlerResult + Send + Sync + 'static,
    {
        self.controller().notifier().on(event, handler)
    }

    /// Remove a subscription.
    pub fn off(&self, event: &str, id: SubscriptionId) -> bool {
        self.controller().notifier().off(event, id)
    }

    /// Publish an event to subscribers without running a transition.
    pub fn emit(&self, event: &TransitionEvent) -> EmitReport {
        self.controller().notifier().publish(event)
    }

    /// Observe every commit. Observers run after the state is unlocked and
    /// may read it.
    pub fn observe_state<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        self.controller().observe_state(observer)
    }

    /// Remove a state observer.
    pub fn unobserve_state(&self, id: ObserverId) -> bool {
        self.controller().unobserve_state(id)
    }

    /// Every navigation command executed, oldest first.
    pub fn command_history(&self) -> Vec<NavigationCommand> {
        self.navigation.invoker().history().to_vec()
    }

    /// The presentation surface being driven.
    pub fn surface(&self) -> &S {
        self.controller().surface()
    }

    /// Wait for the in-flight transition, if any, to complete.
    pub async fn settle(&self) {
        self.controller().settle().await;
    }

    /// Stop auto-advance and wait for the in-flight transition.
    pub async fn shutdown(self) -> StateSnapshot {
        self.disable_auto_advance();
        self.settle().await;
        tracing::info!("carousel shut down");
        self.get_state()
    }
}

impl<S: PresentationSurface + 'static> std::fmt::Debug for Carousel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("state", &self.get_state())
            .field("transitioning", &self.is_transitioning())
            .field("auto_advance", &self.auto_advance)
            .finish()
    }
}
