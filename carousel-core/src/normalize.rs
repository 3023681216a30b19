//! Index normalization.
//!
//! Maps a raw requested position onto a valid slide. Wrapping is a single
//! step in each direction: anything past the end lands on the first slide
//! and anything before the start lands on the last one. Offsets larger
//! than the carousel therefore clamp to an edge instead of wrapping
//! several times (`+50` on three slides lands on slide 1, not slide 3).

use carousel_types::{CarouselError, SlideIndex};

/// Normalize `requested` against a carousel of `total` slides.
///
/// Returns [`CarouselError::NoSlidesFound`] when `total` is 0.
pub fn normalize(requested: i64, total: u32) -> Result<SlideIndex, CarouselError> {
    if total == 0 {
        return Err(CarouselError::NoSlidesFound);
    }

    let position = if requested > i64::from(total) {
        1
    } else if requested < 1 {
        total
    } else {
        requested as u32
    };

    tracing::trace!(requested, total, position, "normalized slide index");

    SlideIndex::new(position).ok_or(CarouselError::NoSlidesFound)
}
