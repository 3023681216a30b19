//! Slide positions and presentation element kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// A 1-based slide position.
///
/// Never zero. Whether it is within `[1, total]` depends on the carousel
/// it was normalized against.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideIndex(NonZeroU32);

impl SlideIndex {
    /// The first slide.
    pub const FIRST: SlideIndex = SlideIndex(NonZeroU32::MIN);

    /// Create a SlideIndex from a 1-based position.
    ///
    /// Returns `None` for 0.
    pub fn new(position: u32) -> Option<Self> {
        NonZeroU32::new(position).map(Self)
    }

    /// The 1-based position.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The position as a signed request value, for offset arithmetic.
    pub fn as_request(self) -> i64 {
        i64::from(self.0.get())
    }

    /// Position within the ordered collection of presentation elements.
    pub fn zero_based(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl Default for SlideIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for SlideIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SlideIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlideIndex({})", self.0)
    }
}

/// The two kinds of presentation elements a carousel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// The slide content itself.
    Slide,
    /// The indicator dot paired with a slide.
    Dot,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Slide => write!(f, "slide"),
            ElementKind::Dot => write!(f, "dot"),
        }
    }
}
