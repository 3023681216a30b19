//! Presentation surface that draws the dot strip to stdout.

use std::sync::{Mutex, MutexGuard, PoisonError};

use carousel_runtime::{ElementKind, PresentationSurface};

/// Terminal surface: each activated dot redraws `○ ● ○`.
#[derive(Debug)]
pub struct TerminalSurface {
    inner: Mutex<Elements>,
}

#[derive(Debug)]
struct Elements {
    slides: Vec<bool>,
    dots: Vec<bool>,
}

impl TerminalSurface {
    /// Create a surface with the given element counts.
    pub fn new(slides: usize, dots: usize) -> Self {
        Self {
            inner: Mutex::new(Elements {
                slides: vec![false; slides],
                dots: vec![false; dots],
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Elements> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Elements {
    fn of(&mut self, kind: ElementKind) -> &mut Vec<bool> {
        match kind {
            ElementKind::Slide => &mut self.slides,
            ElementKind::Dot => &mut self.dots,
        }
    }
}

/// Render dots as a strip of filled and hollow circles.
pub fn render_dots(dots: &[bool]) -> String {
    dots.iter()
        .map(|active| if *active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

impl PresentationSurface for TerminalSurface {
    fn discover_slides(&self) -> usize {
        self.inner().slides.len()
    }

    fn discover_dots(&self) -> usize {
        self.inner().dots.len()
    }

    fn conceal_all(&self, kind: ElementKind) -> usize {
        let mut inner = self.inner();
        let elements = inner.of(kind);
        elements.iter_mut().for_each(|shown| *shown = false);
        elements.len()
    }

    fn reveal_at(&self, kind: ElementKind, position: usize) -> bool {
        let mut inner = self.inner();
        let Some(shown) = inner.of(kind).get_mut(position) else {
            return false;
        };
        *shown = true;

        if kind == ElementKind::Dot {
            println!("[{}]  slide {}", render_dots(&inner.dots), position + 1);
        }
        true
    }
}
