//! # carousel-core
//!
//! Pure navigation logic for the carousel (no I/O, no timers).
//!
//! This crate implements index normalization, the carousel state, the
//! event notifier and transition planning without touching any
//! presentation surface or clock, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! Transition planning takes the state and a request and produces a list
//! of [`TransitionAction`]s. The actual work (concealing and revealing
//! elements, scheduling the deferred completion) is performed by
//! `carousel-runtime`, which interprets those actions in order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod normalize;
pub mod notifier;
pub mod state;
pub mod transition;

pub use command::{CommandInvoker, NavigationCommand, Navigator};
pub use normalize::normalize;
pub use notifier::{EmitReport, HandlerResult, SubscriptionId, TransitionNotifier};
pub use state::{CarouselState, CommitNotice, ObserverId, StateObserver, TransitionPhase};
pub use transition::{TransitionAction, TransitionOutcome};
