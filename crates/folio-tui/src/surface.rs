//! The scrollable page: section layout in terminal rows plus the scroll state.
//!
//! Geometry is reported to the paging controller in pixel-equivalent units
//! (`rows * row_height_px`, `cols * column_width_px`) so its thresholds keep
//! the meaning they have on a web page.

use folio_core::config::UiConfig;
use folio_core::paging::{
    LayoutProvider, ScrollAnimator, ScrollRequest, SectionGeometry, SectionId, Viewport,
};
use tracing::debug;

use crate::content::{text_width, SectionContent};
use crate::scroll::SmoothScroll;

/// Conversion between terminal cells and layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub row_px: f64,
    pub col_px: f64,
}

impl CellMetrics {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            row_px: ui.row_height_px as f64,
            col_px: ui.column_width_px as f64,
        }
    }

    /// Nearest row for a document y, clamped to the u16 range
    pub fn row_at(&self, y: f64) -> u16 {
        (y / self.row_px).round().clamp(0.0, u16::MAX as f64) as u16
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

#[derive(Debug)]
pub struct PageSurface {
    metrics: CellMetrics,
    /// Empty until the first layout pass
    blocks: Vec<SectionBlock>,
    viewport_rows: u16,
    viewport_cols: u16,
    scroll: SmoothScroll,
    /// A section scroll is in flight; its end is reported as scroll-end
    section_scroll: bool,
}

impl PageSurface {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            metrics: CellMetrics::from_config(ui),
            blocks: Vec::new(),
            viewport_rows: 0,
            viewport_cols: 0,
            scroll: SmoothScroll::new(ui.scroll.clone()),
            section_scroll: false,
        }
    }

    /// Lay sections out top to bottom for a `width` x `height` viewport.
    ///
    /// Every section fills at least one viewport; longer content extends it.
    pub fn layout(&mut self, sections: &[SectionContent], width: u16, height: u16) {
        if width == self.viewport_cols
            && height == self.viewport_rows
            && self.blocks.len() == sections.len()
        {
            return;
        }

        self.viewport_cols = width;
        self.viewport_rows = height;
        self.blocks.clear();

        let mut top = 0u16;
        for section in sections {
            let rows = section.rows(text_width(width)).max(height);
            self.blocks.push(SectionBlock {
                id: SectionId::new(section.id.as_str()),
                top,
                height: rows,
            });
            top = top.saturating_add(rows);
        }
        debug!(width, height, total_rows = top, "Page laid out");
    }

    pub fn blocks(&self) -> &[SectionBlock] {
        &self.blocks
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn total_rows(&self) -> u16 {
        self.blocks
            .last()
            .map(|b| b.top.saturating_add(b.height))
            .unwrap_or(0)
    }

    pub fn max_scroll(&self) -> u16 {
        self.total_rows().saturating_sub(self.viewport_rows)
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Visible top row
    pub fn scroll_row(&self) -> u16 {
        self.scroll.current_scroll()
    }

    pub fn needs_update(&self) -> bool {
        self.scroll.needs_update()
    }

    /// Advance the scroll animation by one frame
    pub fn update(&mut self) -> u16 {
        let max = self.max_scroll();
        self.scroll.update(max)
    }

    /// Scroll-end of a section scroll, reported once
    pub fn take_section_scroll_finished(&mut self) -> bool {
        let finished = self.scroll.take_finished();
        if finished && self.section_scroll {
            self.section_scroll = false;
            return true;
        }
        false
    }

    /// Native scroll by whole rows
    pub fn scroll_rows(&mut self, delta: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_by(delta, max);
    }

    /// Native scroll by whole viewports
    pub fn scroll_pages(&mut self, pages: i32) {
        self.scroll_rows(pages * self.viewport_rows.max(1) as i32);
    }

    pub fn scroll_to_row(&mut self, row: u16) {
        let max = self.max_scroll();
        self.scroll.scroll_to(row, max);
    }
}

impl LayoutProvider for PageSurface {
    fn section_geometry(&self, id: &SectionId) -> Option<SectionGeometry> {
        self.blocks.iter().find(|b| &b.id == id).map(|b| {
            SectionGeometry::new(
                b.top as f64 * self.metrics.row_px,
                b.height as f64 * self.metrics.row_px,
            )
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.scroll.current_scroll() as f64 * self.metrics.row_px,
            self.viewport_cols as f64 * self.metrics.col_px,
            self.viewport_rows as f64 * self.metrics.row_px,
        )
    }
}

impl ScrollAnimator for PageSurface {
    fn smooth_scroll(&mut self, request: ScrollRequest) {
        let row = self.metrics.row_at(request.top);
        self.section_scroll = true;
        self.scroll_to_row(row);
    }
}
