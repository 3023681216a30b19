//! Read-only view of the carousel position.

use serde::{Deserialize, Serialize};

use crate::SlideIndex;

/// Snapshot of the carousel state.
///
/// Owns a copy of the history; mutating it never affects the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Active slide.
    pub current_index: SlideIndex,
    /// Slide active before the last commit, if any.
    pub previous_index: Option<SlideIndex>,
    /// Number of slides discovered at startup.
    pub total_slides: u32,
    /// Every committed position, oldest first.
    pub history: Vec<SlideIndex>,
}

impl StateSnapshot {
    /// True when no slides were discovered.
    pub fn is_empty(&self) -> bool {
        self.total_slides == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let snapshot = StateSnapshot {
            current_index: SlideIndex::new(2).unwrap(),
            previous_index: Some(SlideIndex::FIRST),
            total_slides: 3,
            history: vec![SlideIndex::FIRST, SlideIndex::new(2).unwrap()],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["current_index"], 2);
        assert_eq!(json["previous_index"], 1);
        assert_eq!(json["total_slides"], 3);
        assert_eq!(json["history"], serde_json::json!([1, 2]));
        assert!(!snapshot.is_empty());
    }
}
