use serde::{Deserialize, Serialize};

use super::section::SectionId;

/// One smooth-scroll command: bring `section`'s top edge to the viewport start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub section: SectionId,
    /// Document y the viewport top should end at
    pub top: f64,
}

impl ScrollRequest {
    pub fn to_section_start(section: SectionId, top: f64) -> Self {
        Self { section, top }
    }
}

/// Smooth-scroll primitive of the host.
///
/// Fire-and-forget: the controller never waits for completion. Hosts that can
/// observe the end of the animation report it through
/// [`PagingController::scroll_finished`](super::PagingController::scroll_finished).
pub trait ScrollAnimator {
    fn smooth_scroll(&mut self, request: ScrollRequest);
}
