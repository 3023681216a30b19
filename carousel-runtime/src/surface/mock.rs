//! Mock surface for testing.
//!
//! Tracks which element of each kind is visible and records every call.

use super::PresentationSurface;
use carousel_types::ElementKind;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call made against a [`MockSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `conceal_all(kind)`.
    ConcealAll(ElementKind),
    /// `reveal_at(kind, position)` and whether it was found.
    RevealAt(ElementKind, usize, bool),
}

/// In-memory surface with a fixed number of slides and dots.
///
/// Clones share state, so a test can keep one handle while the carousel
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    inner: Arc<Mutex<MockSurfaceInner>>,
}

#[derive(Debug, Default)]
struct MockSurfaceInner {
    slides: Vec<bool>,
    dots: Vec<bool>,
    calls: Vec<SurfaceCall>,
}

impl MockSurface {
    /// Create a surface with `count` slides and as many dots.
    pub fn new(count: usize) -> Self {
        Self::with_dots(count, count)
    }

    /// Create a surface whose dot count differs from its slide count.
    pub fn with_dots(slides: usize, dots: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockSurfaceInner {
                slides: vec![false; slides],
                dots: vec![false; dots],
                calls: Vec::new(),
            })),
        }
    }

    fn inner(&self) -> MutexGuard<'_, MockSurfaceInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Zero-based positions of visible elements of `kind`.
    pub fn visible(&self, kind: ElementKind) -> Vec<usize> {
        let inner = self.inner();
        inner
            .elements(kind)
            .iter()
            .enumerate()
            .filter_map(|(i, shown)| shown.then_some(i))
            .collect()
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.inner().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.inner().calls.clear();
    }
}

impl MockSurfaceInner {
    fn elements(&self, kind: ElementKind) -> &Vec<bool> {
        match kind {
            ElementKind::Slide => &self.slides,
            ElementKind::Dot => &self.dots,
        }
    }

    fn elements_mut(&mut self, kind: ElementKind) -> &mut Vec<bool> {
        match kind {
            ElementKind::Slide => &mut self.slides,
            ElementKind::Dot => &mut self.dots,
        }
    }
}

impl PresentationSurface for MockSurface {
    fn discover_slides(&self) -> usize {
        self.inner().slides.len()
    }

    fn discover_dots(&self) -> usize {
        self.inner().dots.len()
    }

    fn conceal_all(&self, kind: ElementKind) -> usize {
        let mut inner = self.inner();
        inner.calls.push(SurfaceCall::ConcealAll(kind));
        let elements = inner.elements_mut(kind);
        elements.iter_mut().for_each(|shown| *shown = false);
        elements.len()
    }

    fn reveal_at(&self, kind: ElementKind, position: usize) -> bool {
        let mut inner = self.inner();
        let found = match inner.elements_mut(kind).get_mut(position) {
            Some(shown) => {
                *shown = true;
                true
            }
            None => false,
        };
        inner.calls.push(SurfaceCall::RevealAt(kind, position, found));
        found
    }
}
