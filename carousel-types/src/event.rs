//! Transition events.
//!
//! Events are ephemeral: they are delivered synchronously to subscribers
//! and never stored.

use serde::{Deserialize, Serialize};

use crate::SlideIndex;

/// Canonical event names used when publishing [`TransitionEvent`]s.
///
/// Names are opaque strings matched exactly by the notifier.
pub mod names {
    /// A transition has started.
    pub const TRANSITION_START: &str = "transition:start";
    /// The deferred completion of a transition fired.
    pub const TRANSITION_COMPLETE: &str = "transition:complete";
    /// Every slide has been concealed.
    pub const SLIDES_HIDDEN: &str = "slides:hidden";
    /// The target slide has been revealed.
    pub const SLIDE_SHOWN: &str = "slide:shown";
    /// Every dot has been deactivated.
    pub const DOTS_DEACTIVATED: &str = "dots:deactivated";
    /// The dot paired with the target slide has been activated.
    pub const DOT_ACTIVATED: &str = "dot:activated";

    /// All event names, in the order they occur within one transition.
    pub const ALL: [&str; 6] = [
        TRANSITION_START,
        SLIDES_HIDDEN,
        DOTS_DEACTIVATED,
        SLIDE_SHOWN,
        DOT_ACTIVATED,
        TRANSITION_COMPLETE,
    ];
}

/// Something that happened during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// Transition accepted and about to touch the presentation surface.
    Start {
        /// Position before the transition.
        from: SlideIndex,
        /// Normalized target position.
        to: SlideIndex,
    },
    /// Deferred completion fired; the carousel is idle again.
    Complete {
        /// Position the transition ended on.
        index: SlideIndex,
    },
    /// Slides concealed.
    Hidden {
        /// Number of slides affected.
        count: usize,
    },
    /// Target slide revealed.
    Shown {
        /// Revealed position.
        index: SlideIndex,
    },
    /// Dots deactivated.
    DotsDeactivated {
        /// Number of dots affected.
        count: usize,
    },
    /// Target dot activated.
    DotActivated {
        /// Activated position.
        index: SlideIndex,
    },
}

impl TransitionEvent {
    /// The name this event is published under.
    pub fn name(&self) -> &'static str {
        match self {
            TransitionEvent::Start { .. } => names::TRANSITION_START,
            TransitionEvent::Complete { .. } => names::TRANSITION_COMPLETE,
            TransitionEvent::Hidden { .. } => names::SLIDES_HIDDEN,
            TransitionEvent::Shown { .. } => names::SLIDE_SHOWN,
            TransitionEvent::DotsDeactivated { .. } => names::DOTS_DEACTIVATED,
            TransitionEvent::DotActivated { .. } => names::DOT_ACTIVATED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_distinct_name() {
        let two = SlideIndex::new(2).unwrap();
        let events = [
            TransitionEvent::Start {
                from: SlideIndex::FIRST,
                to: two,
            },
            TransitionEvent::Hidden { count: 3 },
            TransitionEvent::DotsDeactivated { count: 3 },
            TransitionEvent::Shown { index: two },
            TransitionEvent::DotActivated { index: two },
            TransitionEvent::Complete { index: two },
        ];

        let event_names: Vec<&str> = events.iter().map(|e| e.name()).collect();
        assert_eq!(event_names, names::ALL);
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = TransitionEvent::Start {
            from: SlideIndex::FIRST,
            to: SlideIndex::new(2).unwrap(),
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "start");
        assert_eq!(json["from"], 1);
        assert_eq!(json["to"], 2);
    }
}
