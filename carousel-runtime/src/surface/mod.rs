//! Presentation surface abstraction.
//!
//! The carousel never touches rendering directly. A surface owns the
//! ordered slide and dot elements and exposes bulk conceal plus
//! positional reveal.
//!
//! # Design
//!
//! The trait is synchronous; every call happens inside the synchronous
//! phase of a transition:
//! - `discover_slides()` / `discover_dots()` count elements once at startup
//! - `conceal_all()` hides every element of a kind
//! - `reveal_at()` shows one element by zero-based position

mod mock;

pub use mock::{MockSurface, SurfaceCall};

use carousel_types::ElementKind;

/// Ordered slide and dot elements of one carousel.
pub trait PresentationSurface: Send + Sync {
    /// Number of slide elements.
    fn discover_slides(&self) -> usize;

    /// Number of dot elements.
    fn discover_dots(&self) -> usize;

    /// Conceal every element of `kind`. Returns how many were affected.
    fn conceal_all(&self, kind: ElementKind) -> usize;

    /// Reveal the element of `kind` at zero-based `position`.
    ///
    /// Returns false when no such element exists.
    fn reveal_at(&self, kind: ElementKind, position: usize) -> bool;
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for std::sync::Arc<S> {
    fn discover_slides(&self) -> usize {
        (**self).discover_slides()
    }

    fn discover_dots(&self) -> usize {
        (**self).discover_dots()
    }

    fn conceal_all(&self, kind: ElementKind) -> usize {
        (**self).conceal_all(kind)
    }

    fn reveal_at(&self, kind: ElementKind, position: usize) -> bool {
        (**self).reveal_at(kind, position)
    }
}
