use super::gate::Direction;
use super::layout::{SectionGeometry, Viewport};

pub const DEFAULT_EDGE_TOLERANCE: f64 = 8.0;

/// Whether the viewport has reached the edge of `section` in `direction`.
///
/// Forward needs the section bottom inside the viewport, backward needs the
/// section top inside it, each within `tolerance`.
pub fn boundary_permits(
    direction: Direction,
    section: SectionGeometry,
    viewport: Viewport,
    tolerance: f64,
) -> bool {
    match direction {
        Direction::Forward => viewport.bottom() >= section.bottom() - tolerance,
        Direction::Backward => viewport.top() <= section.top + tolerance,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundaryCheck {
    tolerance: f64,
}

impl Default for BoundaryCheck {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_TOLERANCE)
    }
}

impl BoundaryCheck {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn permits(&self, direction: Direction, section: SectionGeometry, viewport: Viewport) -> bool {
        boundary_permits(direction, section, viewport, self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: SectionGeometry = SectionGeometry {
        top: 1000.0,
        height: 1200.0,
    };

    fn viewport(top: f64, bottom: f64) -> Viewport {
        Viewport::new(top, 1280.0, bottom - top)
    }

    #[test]
    fn test_forward_blocked_mid_section() {
        let check = BoundaryCheck::default();
        assert!(!check.permits(Direction::Forward, B, viewport(1000.0, 1800.0)));
    }

    #[test]
    fn test_forward_allowed_at_bottom() {
        let check = BoundaryCheck::default();
        assert!(check.permits(Direction::Forward, B, viewport(1392.0, 2200.0)));
        // inside the tolerance band
        assert!(check.permits(Direction::Forward, B, viewport(1384.0, 2192.0)));
        assert!(!check.permits(Direction::Forward, B, viewport(1383.0, 2191.0)));
    }

    #[test]
    fn test_backward_needs_section_top_in_view() {
        let check = BoundaryCheck::default();
        assert!(check.permits(Direction::Backward, B, viewport(1000.0, 1800.0)));
        assert!(check.permits(Direction::Backward, B, viewport(1008.0, 1808.0)));
        assert!(!check.permits(Direction::Backward, B, viewport(1009.0, 1809.0)));
    }

    #[test]
    fn test_short_section_permits_both_directions() {
        let short = SectionGeometry::new(1000.0, 400.0);
        let check = BoundaryCheck::default();
        let v = viewport(1000.0, 1800.0);
        assert!(check.permits(Direction::Forward, short, v));
        assert!(check.permits(Direction::Backward, short, v));
    }

    #[test]
    fn test_zero_tolerance() {
        let check = BoundaryCheck::new(0.0);
        assert!(!check.permits(Direction::Forward, B, viewport(1384.0, 2192.0)));
        assert!(check.permits(Direction::Forward, B, viewport(1400.0, 2200.0)));
    }
}
