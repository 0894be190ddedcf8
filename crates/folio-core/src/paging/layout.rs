use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::animator::{ScrollAnimator, ScrollRequest};
use super::section::SectionId;

/// Document-relative vertical extent of one section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Visible window into the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset (document y at the top of the window)
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.scroll_y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}

/// Live geometry queries supplied by the hosting surface
pub trait LayoutProvider {
    /// Geometry of a section, `None` if it is not laid out (or unknown)
    fn section_geometry(&self, id: &SectionId) -> Option<SectionGeometry>;

    /// Current scroll position and viewport size
    fn viewport(&self) -> Viewport;
}

/// In-memory layout with fixed geometry.
///
/// Used for simulations and tests. Scroll requests are recorded and, when
/// `jump_on_scroll` is set, applied to the viewport immediately.
#[derive(Debug, Clone)]
pub struct StaticLayout {
    sections: HashMap<SectionId, SectionGeometry>,
    viewport: Viewport,
    requests: Vec<ScrollRequest>,
    jump_on_scroll: bool,
}

impl StaticLayout {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            sections: HashMap::new(),
            viewport,
            requests: Vec::new(),
            jump_on_scroll: false,
        }
    }

    /// Stack sections top to bottom starting at y = 0
    pub fn stacked<'a>(
        sections: impl IntoIterator<Item = (&'a SectionId, f64)>,
        viewport: Viewport,
    ) -> Self {
        let mut layout = Self::new(viewport);
        let mut top = 0.0;
        for (id, height) in sections {
            layout.insert(id.clone(), SectionGeometry::new(top, height));
            top += height;
        }
        layout
    }

    pub fn with_jump_on_scroll(mut self, jump: bool) -> Self {
        self.jump_on_scroll = jump;
        self
    }

    pub fn insert(&mut self, id: SectionId, geometry: SectionGeometry) {
        self.sections.insert(id, geometry);
    }

    pub fn remove(&mut self, id: &SectionId) -> Option<SectionGeometry> {
        self.sections.remove(id)
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    pub fn last_request(&self) -> Option<&ScrollRequest> {
        self.requests.last()
    }
}

impl LayoutProvider for StaticLayout {
    fn section_geometry(&self, id: &SectionId) -> Option<SectionGeometry> {
        self.sections.get(id).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl ScrollAnimator for StaticLayout {
    fn smooth_scroll(&mut self, request: ScrollRequest) {
        if self.jump_on_scroll {
            self.viewport.scroll_y = request.top;
        }
        self.requests.push(request);
    }
}
