//! Auto-advance timer.
//!
//! Issues a `ByOffset(step)` navigation command on a fixed interval. At
//! most one timer is active: starting again replaces the running one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use carousel_core::{NavigationCommand, TransitionOutcome};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Destination for commands issued by the scheduler.
pub trait CommandSink: Send + Sync + 'static {
    /// Run `command`.
    fn dispatch(&self, command: NavigationCommand) -> TransitionOutcome;
}

/// Periodic auto-advance timer.
pub struct AutoAdvanceScheduler {
    sink: Arc<dyn CommandSink>,
    interval: Duration,
    step: i64,
    runtime: Handle,
    task: Mutex<Option<JoinHandle<()>>>,
    ticks: Arc<AtomicU64>,
}

impl AutoAdvanceScheduler {
    /// Create a stopped scheduler.
    pub fn new(sink: Arc<dyn CommandSink>, interval: Duration, step: i64, runtime: Handle) -> Self {
        Self {
            sink,
            interval,
            step,
            runtime,
            task: Mutex::new(None),
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    fn task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start ticking, replacing any active timer.
    ///
    /// The first tick fires one interval after this call.
    pub fn start(&self) {
        let mut task = self.task();
        if let Some(existing) = task.take() {
            existing.abort();
            tracing::debug!("replaced active auto-advance timer");
        }

        let sink = Arc::clone(&self.sink);
        let ticks = Arc::clone(&self.ticks);
        let interval = self.interval;
        let command = NavigationCommand::ByOffset(self.step);

        *task = Some(self.runtime.spawn(async move {
            let mut timer = interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                let tick = ticks.fetch_add(1, Ordering::Relaxed) + 1;
                let outcome = sink.dispatch(command);
                tracing::trace!(tick, ?outcome, "auto-advance tick");
            }
        }));

        tracing::info!(?interval, step = self.step, "auto-advance started");
    }

    /// Stop ticking. Safe to call when not running.
    ///
    /// Returns true if a timer was active.
    pub fn stop(&self) -> bool {
        match self.task().take() {
            Some(task) => {
                task.abort();
                tracing::info!("auto-advance stopped");
                true
            }
            None => false,
        }
    }

    /// Check if a timer is active.
    pub fn is_running(&self) -> bool {
        self.task().as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Total ticks fired since creation, across restarts.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for AutoAdvanceScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for AutoAdvanceScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoAdvanceScheduler")
            .field("interval", &self.interval())
            .field("step", &self.step)
            .field("running", &self.is_running())
            .field("ticks", &self.ticks())
            .finish()
    }
}
