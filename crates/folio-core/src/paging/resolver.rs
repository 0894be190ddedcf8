use super::layout::{LayoutProvider, Viewport};
use super::section::SectionOrder;

/// Default position of the probe line, as a fraction of viewport height
pub const DEFAULT_REFERENCE_RATIO: f64 = 0.25;

/// Pick the active section from per-section top offsets.
///
/// `tops` is in registry order; `None` marks a section without geometry,
/// which can never become active. The winner is the section with the greatest
/// top at or above the probe line `scroll_y + viewport_height * ratio`; equal
/// tops resolve to the later entry. Falls back to 0.
pub fn resolve_active_index<I>(tops: I, scroll_y: f64, viewport_height: f64, ratio: f64) -> usize
where
    I: IntoIterator<Item = Option<f64>>,
{
    let reference_y = scroll_y + viewport_height * ratio;
    let mut best_index = 0;
    let mut best_top = f64::NEG_INFINITY;

    for (index, top) in tops.into_iter().enumerate() {
        let Some(top) = top else { continue };
        if top <= reference_y && top >= best_top {
            best_top = top;
            best_index = index;
        }
    }

    best_index
}

/// Active index for the live layout with the default probe ratio
pub fn active_section_index(order: &SectionOrder, layout: &impl LayoutProvider) -> usize {
    ActiveSectionResolver::default().resolve(order, layout)
}

#[derive(Debug, Clone, Copy)]
pub struct ActiveSectionResolver {
    reference_ratio: f64,
}

impl Default for ActiveSectionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_RATIO)
    }
}

impl ActiveSectionResolver {
    pub fn new(reference_ratio: f64) -> Self {
        Self { reference_ratio }
    }

    pub fn resolve(&self, order: &SectionOrder, layout: &impl LayoutProvider) -> usize {
        let Viewport {
            scroll_y, height, ..
        } = layout.viewport();
        resolve_active_index(
            order
                .iter()
                .map(|id| layout.section_geometry(id).map(|g| g.top)),
            scroll_y,
            height,
            self.reference_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::layout::{SectionGeometry, StaticLayout};
    use crate::paging::section::SectionId;

    const TOPS: [f64; 5] = [0.0, 1000.0, 2200.0, 3500.0, 4800.0];

    fn tops() -> impl Iterator<Item = Option<f64>> {
        TOPS.into_iter().map(Some)
    }

    #[test]
    fn test_probe_line_inside_second_section() {
        // reference y = 1150 + 200 = 1350
        assert_eq!(resolve_active_index(tops(), 1150.0, 800.0, 0.25), 1);
    }

    #[test]
    fn test_top_of_document_is_first_section() {
        for height in [0.0, 400.0, 800.0, 3000.0] {
            assert_eq!(resolve_active_index(tops(), 0.0, height, 0.25), 0);
        }
    }

    #[test]
    fn test_section_becomes_active_at_quarter_viewport() {
        // probe at 2200 exactly: top <= probe, so C wins
        assert_eq!(resolve_active_index(tops(), 2000.0, 800.0, 0.25), 2);
        assert_eq!(resolve_active_index(tops(), 1999.0, 800.0, 0.25), 1);
    }

    #[test]
    fn test_missing_geometry_is_skipped() {
        let tops = [Some(0.0), None, Some(2200.0)];
        assert_eq!(resolve_active_index(tops, 1150.0, 800.0, 0.25), 0);
    }

    #[test]
    fn test_nothing_qualifies_defaults_to_zero() {
        let tops = [Some(500.0), Some(900.0)];
        assert_eq!(resolve_active_index(tops, 0.0, 800.0, 0.25), 0);
        assert_eq!(resolve_active_index([None, None], 5000.0, 800.0, 0.25), 0);
    }

    #[test]
    fn test_highest_top_wins_not_registry_order() {
        // registry order deliberately not sorted by top
        let tops = [Some(0.0), Some(1800.0), Some(1200.0)];
        assert_eq!(resolve_active_index(tops, 1700.0, 800.0, 0.25), 1);
    }

    #[test]
    fn test_equal_tops_resolve_to_later_entry() {
        let tops = [Some(0.0), Some(1000.0), Some(1000.0)];
        assert_eq!(resolve_active_index(tops, 1000.0, 800.0, 0.25), 2);
    }

    #[test]
    fn test_resolver_reads_live_layout() {
        let order = SectionOrder::reference();
        let mut layout = StaticLayout::new(crate::paging::Viewport::new(1150.0, 1280.0, 800.0));
        for (id, top) in order.iter().zip(TOPS) {
            layout.insert(id.clone(), SectionGeometry::new(top, 1000.0));
        }
        assert_eq!(active_section_index(&order, &layout), 1);

        layout.remove(&SectionId::new("work"));
        assert_eq!(active_section_index(&order, &layout), 0);

        // a larger probe ratio reaches further down
        layout.scroll_to(1500.0);
        assert_eq!(ActiveSectionResolver::new(0.9).resolve(&order, &layout), 2);
    }
}
