//! Ordered, synchronous publish/subscribe for transition events.
//!
//! Handlers are grouped by event name and invoked in registration order on
//! the emitting thread. Names are opaque strings matched exactly; there
//! are no wildcards.
//!
//! A handler that returns an error or panics is logged and skipped.
//! Delivery continues with the next handler and the emitter never sees
//! the failure.
//!
//! The registry lock is released before any handler runs, so handlers may
//! subscribe or unsubscribe while being delivered to.

use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use carousel_types::{CarouselError, TransitionEvent};

/// Result type returned by event handlers.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Handler<P> = Arc<dyn Fn(&P) -> HandlerResult + Send + Sync>;

/// Handle returned by [`TransitionNotifier::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Delivery outcome of one [`TransitionNotifier::emit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Handlers that ran to completion.
    pub delivered: usize,
    /// Handlers that returned an error or panicked.
    pub failed: usize,
}

struct Registry<P> {
    handlers: HashMap<String, Vec<(SubscriptionId, Handler<P>)>>,
    next_id: u64,
}

/// Event notifier keyed by event name.
pub struct TransitionNotifier<P = TransitionEvent> {
    registry: Mutex<Registry<P>>,
}

impl<P> TransitionNotifier<P> {
    /// Create a notifier with no subscriptions.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                handlers: HashMap::new(),
                next_id: 0,
            }),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry<P>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe `handler` to `event`.
    pub fn on<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry
            .handlers
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered for `event`.
    pub fn off(&self, event: &str, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let Some(handlers) = registry.handlers.get_mut(event) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            registry.handlers.remove(event);
        }
        removed
    }

    /// Number of handlers subscribed to `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry().handlers.get(event).map_or(0, Vec::len)
    }

    /// Deliver `payload` to every handler of `event`, in registration order.
    pub fn emit(&self, event: &str, payload: &P) -> EmitReport {
        let handlers: Vec<Handler<P>> = match self.registry().handlers.get(event) {
            Some(handlers) => handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            None => return EmitReport::default(),
        };

        let mut report = EmitReport::default();
        for handler in handlers {
            let failure = match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(panic) => Some(panic_message(panic.as_ref())),
            };

            match failure {
                None => report.delivered += 1,
                Some(reason) => {
                    report.failed += 1;
                    let err = CarouselError::HandlerFailed {
                        event: event.to_string(),
                        reason,
                    };
                    tracing::error!(event, "{}", err);
                }
            }
        }
        report
    }
}

impl TransitionNotifier<TransitionEvent> {
    /// Emit `event` under its canonical name.
    pub fn publish(&self, event: &TransitionEvent) -> EmitReport {
        self.emit(event.name(), event)
    }
}

impl<P> Default for TransitionNotifier<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for TransitionNotifier<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry();
        let mut counts: Vec<(&str, usize)> = registry
            .handlers
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("TransitionNotifier")
            .field("handlers", &counts)
            .finish()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("panicked: {}", msg)
    } else {
        "panicked".to_string()
    }
}
