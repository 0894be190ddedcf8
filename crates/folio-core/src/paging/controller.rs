use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::config::{PagingConfig, ReleaseStrategy};

use super::animator::{ScrollAnimator, ScrollRequest};
use super::boundary::BoundaryCheck;
use super::gate::{Direction, GateContext, Gesture, GestureGate, PassReason, Verdict};
use super::layout::LayoutProvider;
use super::lock::{PagingLock, PagingState, SettleTicket};
use super::resolver::ActiveSectionResolver;
use super::section::{SectionId, SectionOrder};
use super::timer::SettleTimer;

/// Wheel/keyboard listener registration on the host
pub trait InputBinding {
    fn attach(&mut self) -> crate::Result<()>;
    fn detach(&mut self) -> crate::Result<()>;
}

/// Result of handling one gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Let the host scroll natively
    PassThrough(PassReason),
    /// A page jump was issued; the host must swallow the event
    Paged {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

impl Outcome {
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Outcome::Paged { .. })
    }

    pub fn pass_reason(&self) -> Option<PassReason> {
        match self {
            Outcome::PassThrough(reason) => Some(*reason),
            Outcome::Paged { .. } => None,
        }
    }
}

/// Converts input gestures into whole-section jumps.
///
/// Lives from mount to unmount. Owns the paging lock and the settle timer;
/// geometry and scrolling are borrowed from the host per call.
pub struct PagingController<T: SettleTimer> {
    order: SectionOrder,
    gate: GestureGate,
    resolver: ActiveSectionResolver,
    boundary: BoundaryCheck,
    lock: PagingLock,
    timer: T,
    settle_duration: Duration,
    release: ReleaseStrategy,
    keyboard_boundary_check: bool,
    /// Snapshot taken at construction
    reduced_motion: bool,
    attached: bool,
}

impl<T: SettleTimer> PagingController<T> {
    pub fn new(order: SectionOrder, config: &PagingConfig, timer: T) -> Self {
        let reduced_motion = config.prefers_reduced_motion();
        if reduced_motion {
            debug!("Reduced motion preferred, section paging disabled");
        }

        Self {
            order,
            gate: GestureGate::new(config.min_viewport_width, config.wheel_noise_threshold),
            resolver: ActiveSectionResolver::new(config.reference_ratio),
            boundary: BoundaryCheck::new(config.edge_tolerance),
            lock: PagingLock::new(),
            timer,
            settle_duration: config.settle_duration(),
            release: config.release,
            keyboard_boundary_check: config.keyboard_boundary_check,
            reduced_motion,
            attached: false,
        }
    }

    /// Attach input listeners. On failure the controller stays detached and
    /// every gesture passes through.
    pub fn mount(&mut self, binding: &mut impl InputBinding) -> bool {
        if self.attached {
            return true;
        }
        match binding.attach() {
            Ok(()) => {
                self.attached = true;
                debug!(sections = self.order.len(), "Section paging mounted");
            }
            Err(e) => {
                warn!("Failed to attach input listeners, using native scrolling: {}", e);
            }
        }
        self.attached
    }

    /// Detach listeners and drop any in-flight paging cycle
    pub fn unmount(&mut self, binding: &mut impl InputBinding) {
        if self.attached {
            if let Err(e) = binding.detach() {
                warn!("Failed to detach input listeners: {}", e);
            }
        }
        self.attached = false;
        self.timer.cancel_all();
        self.lock.invalidate();
        debug!("Section paging unmounted");
    }

    pub fn handle<S>(&mut self, gesture: Gesture, surface: &mut S) -> Outcome
    where
        S: LayoutProvider + ScrollAnimator,
    {
        let outcome = self.decide(gesture, surface);
        match outcome {
            Outcome::PassThrough(reason) => {
                trace!(?gesture, %reason, "Gesture passed through");
            }
            Outcome::Paged { from, to, .. } => {
                debug!(
                    from = %self.order.get(from).map(SectionId::as_str).unwrap_or("?"),
                    to = %self.order.get(to).map(SectionId::as_str).unwrap_or("?"),
                    "Paging"
                );
            }
        }
        outcome
    }

    fn decide<S>(&mut self, gesture: Gesture, surface: &mut S) -> Outcome
    where
        S: LayoutProvider + ScrollAnimator,
    {
        if !self.attached {
            return Outcome::PassThrough(PassReason::Detached);
        }

        let viewport = surface.viewport();
        let ctx = GateContext {
            reduced_motion: self.reduced_motion,
            viewport_width: viewport.width,
            locked: self.lock.is_held(),
        };
        let direction = match self.gate.evaluate(&gesture, &ctx) {
            Verdict::PassThrough(reason) => return Outcome::PassThrough(reason),
            Verdict::Page(direction) => direction,
        };

        let index = self.resolver.resolve(&self.order, &*surface);

        if gesture.is_wheel() || self.keyboard_boundary_check {
            let Some(active) = self
                .order
                .get(index)
                .and_then(|id| surface.section_geometry(id))
            else {
                return Outcome::PassThrough(PassReason::MissingGeometry);
            };
            if !self.boundary.permits(direction, active, viewport) {
                return Outcome::PassThrough(PassReason::MidSection);
            }
        }

        let next = self.order.step(index, direction);
        if next == index {
            return Outcome::PassThrough(PassReason::AtEdge);
        }

        let Some(request) = self.request_for(next, &*surface) else {
            return Outcome::PassThrough(PassReason::MissingGeometry);
        };
        let Some(ticket) = self.lock.try_begin() else {
            return Outcome::PassThrough(PassReason::Paging);
        };

        surface.smooth_scroll(request);
        self.timer.schedule(self.settle_duration, ticket);

        Outcome::Paged {
            from: index,
            to: next,
            direction,
        }
    }

    fn request_for(&self, index: usize, layout: &impl LayoutProvider) -> Option<ScrollRequest> {
        let id = self.order.get(index)?;
        let geometry = layout.section_geometry(id)?;
        Some(ScrollRequest::to_section_start(id.clone(), geometry.top))
    }

    /// Scroll straight to a section, as a navbar link does.
    ///
    /// Does not take the paging lock. Returns false for an unknown index or a
    /// section that is not laid out.
    pub fn navigate_to<S>(&mut self, index: usize, surface: &mut S) -> bool
    where
        S: LayoutProvider + ScrollAnimator,
    {
        match self.request_for(index, &*surface) {
            Some(request) => {
                debug!(section = %request.section, "Navigating");
                surface.smooth_scroll(request);
                true
            }
            None => false,
        }
    }

    /// Settle timer callback
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        let released = self.lock.end(ticket);
        if released {
            trace!(generation = ticket.generation(), "Paging settled");
        }
        released
    }

    /// Host notification that the smooth scroll finished.
    ///
    /// Releases the lock early only with [`ReleaseStrategy::ScrollEnd`]; the
    /// pending timer then finds a stale ticket and does nothing.
    pub fn scroll_finished(&mut self) -> bool {
        if self.release != ReleaseStrategy::ScrollEnd {
            return false;
        }
        match self.lock.current_ticket() {
            Some(ticket) => self.settle(ticket),
            None => false,
        }
    }

    pub fn active_index(&self, layout: &impl LayoutProvider) -> usize {
        self.resolver.resolve(&self.order, layout)
    }

    pub fn active_section(&self, layout: &impl LayoutProvider) -> &SectionId {
        let index = self.active_index(layout);
        self.order.get(index).unwrap_or_else(|| self.order.first())
    }

    #[inline]
    pub fn is_paging(&self) -> bool {
        self.lock.is_held()
    }

    pub fn state(&self) -> PagingState {
        self.lock.state()
    }

    /// Read-only paging signal for transition overlays
    pub fn subscribe(&self) -> watch::Receiver<PagingState> {
        self.lock.subscribe()
    }

    pub fn order(&self) -> &SectionOrder {
        &self.order
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::gate::{ControlKind, EventTarget, NavKey};
    use crate::paging::layout::{SectionGeometry, StaticLayout, Viewport};
    use crate::paging::timer::ManualTimer;

    const TOPS: [f64; 5] = [0.0, 1000.0, 2200.0, 3500.0, 4800.0];
    const HEIGHTS: [f64; 5] = [1000.0, 1200.0, 1300.0, 1300.0, 800.0];
    const SETTLE: Duration = Duration::from_millis(750);

    #[derive(Default)]
    struct FakeBinding {
        fail_attach: bool,
        fail_detach: bool,
        attached: bool,
    }

    impl InputBinding for FakeBinding {
        fn attach(&mut self) -> crate::Result<()> {
            if self.fail_attach {
                return Err(crate::Error::InputBinding("no mouse capture".into()));
            }
            self.attached = true;
            Ok(())
        }

        fn detach(&mut self) -> crate::Result<()> {
            self.attached = false;
            if self.fail_detach {
                return Err(crate::Error::InputBinding("terminal gone".into()));
            }
            Ok(())
        }
    }

    fn config() -> PagingConfig {
        PagingConfig {
            reduced_motion: Some(false),
            ..Default::default()
        }
    }

    fn layout(scroll_y: f64, height: f64) -> StaticLayout {
        let mut layout = StaticLayout::new(Viewport::new(scroll_y, 1280.0, height));
        for ((id, top), h) in SectionOrder::reference().iter().zip(TOPS).zip(HEIGHTS) {
            layout.insert(id.clone(), SectionGeometry::new(top, h));
        }
        layout
    }

    fn mounted(config: &PagingConfig) -> PagingController<ManualTimer> {
        let mut controller =
            PagingController::new(SectionOrder::reference(), config, ManualTimer::new());
        assert!(controller.mount(&mut FakeBinding::default()));
        controller
    }

    /// Fire due settle timers
    fn advance(controller: &mut PagingController<ManualTimer>, by: Duration) {
        for ticket in controller.timer_mut().advance(by) {
            controller.settle(ticket);
        }
    }

    #[test]
    fn test_forward_wheel_blocked_mid_section() {
        let mut controller = mounted(&config());
        let mut surface = layout(1000.0, 800.0);

        let outcome = controller.handle(Gesture::wheel(100.0), &mut surface);
        assert_eq!(outcome, Outcome::PassThrough(PassReason::MidSection));
        assert!(!outcome.suppresses_default());
        assert!(surface.requests().is_empty());
        assert_eq!(controller.state(), PagingState::Idle);
    }

    #[test]
    fn test_forward_wheel_at_section_bottom_pages() {
        let mut controller = mounted(&config());
        let mut surface = layout(1392.0, 808.0);
        assert_eq!(controller.active_index(&surface), 1);

        let outcome = controller.handle(Gesture::wheel(8.0), &mut surface);
        assert_eq!(
            outcome,
            Outcome::Paged {
                from: 1,
                to: 2,
                direction: Direction::Forward
            }
        );
        assert!(outcome.suppresses_default());
        assert_eq!(controller.state(), PagingState::Paging);

        let request = surface.last_request().unwrap();
        assert_eq!(request.section.as_str(), "about");
        assert_eq!(request.top, 2200.0);
        assert_eq!(controller.timer().pending(), 1);
    }

    #[test]
    fn test_lock_rejects_until_settled() {
        let mut controller = mounted(&config());
        let mut surface = layout(1392.0, 808.0).with_jump_on_scroll(true);

        assert!(controller
            .handle(Gesture::wheel(120.0), &mut surface)
            .suppresses_default());

        // same turn, before any redraw
        assert_eq!(
            controller.handle(Gesture::key(NavKey::PageDown), &mut surface),
            Outcome::PassThrough(PassReason::Paging)
        );

        advance(&mut controller, SETTLE - Duration::from_millis(1));
        assert!(controller.is_paging());
        assert_eq!(
            controller.handle(Gesture::wheel(-120.0), &mut surface),
            Outcome::PassThrough(PassReason::Paging)
        );

        advance(&mut controller, Duration::from_millis(1));
        assert_eq!(controller.state(), PagingState::Idle);

        // viewport now at the top of "about"
        assert_eq!(
            controller.handle(Gesture::key(NavKey::ArrowDown), &mut surface),
            Outcome::Paged {
                from: 2,
                to: 3,
                direction: Direction::Forward
            }
        );
        assert_eq!(surface.requests().len(), 2);
    }

    #[test]
    fn test_key_in_text_input_passes_through() {
        let mut controller = mounted(&config());
        let mut surface = layout(0.0, 800.0);
        let gesture =
            Gesture::key(NavKey::ArrowDown).on(EventTarget::Control(ControlKind::TextInput));

        assert_eq!(
            controller.handle(gesture, &mut surface),
            Outcome::PassThrough(PassReason::EditableTarget)
        );
        assert!(surface.requests().is_empty());
    }

    #[test]
    fn test_reduced_motion_never_pages() {
        let config = PagingConfig {
            reduced_motion: Some(true),
            ..Default::default()
        };
        let mut controller = mounted(&config);
        assert!(controller.reduced_motion());

        for scroll_y in [0.0, 1392.0, 4800.0] {
            let mut surface = layout(scroll_y, 808.0);
            for gesture in [
                Gesture::wheel(500.0),
                Gesture::wheel(-500.0),
                Gesture::key(NavKey::PageDown),
                Gesture::key(NavKey::ArrowUp),
            ] {
                assert_eq!(
                    controller.handle(gesture, &mut surface),
                    Outcome::PassThrough(PassReason::ReducedMotion)
                );
            }
        }
        assert!(!controller.is_paging());
    }

    #[test]
    fn test_forward_at_last_section_is_noop() {
        let mut controller = mounted(&config());
        let mut surface = layout(4800.0, 800.0);
        assert_eq!(controller.active_index(&surface), 4);

        for gesture in [Gesture::wheel(120.0), Gesture::key(NavKey::Space)] {
            assert_eq!(
                controller.handle(gesture, &mut surface),
                Outcome::PassThrough(PassReason::AtEdge)
            );
        }
        assert_eq!(controller.active_index(&surface), 4);
        assert_eq!(controller.state(), PagingState::Idle);
        assert_eq!(controller.timer().pending(), 0);
    }

    #[test]
    fn test_backward_at_first_section_is_noop() {
        let mut controller = mounted(&config());
        let mut surface = layout(0.0, 800.0);
        assert_eq!(
            controller.handle(Gesture::key(NavKey::PageUp), &mut surface),
            Outcome::PassThrough(PassReason::AtEdge)
        );
    }

    #[test]
    fn test_keyboard_skips_boundary_by_default() {
        let mut controller = mounted(&config());
        let mut surface = layout(1000.0, 800.0);
        assert!(matches!(
            controller.handle(Gesture::key(NavKey::PageDown), &mut surface),
            Outcome::Paged { to: 2, .. }
        ));

        let config = PagingConfig {
            keyboard_boundary_check: true,
            ..config()
        };
        let mut controller = mounted(&config);
        assert_eq!(
            controller.handle(Gesture::key(NavKey::PageDown), &mut surface),
            Outcome::PassThrough(PassReason::MidSection)
        );
    }

    #[test]
    fn test_backward_wheel_from_section_top() {
        let mut controller = mounted(&config());
        let mut surface = layout(2204.0, 800.0);
        assert_eq!(
            controller.handle(Gesture::wheel(-40.0), &mut surface),
            Outcome::Paged {
                from: 2,
                to: 1,
                direction: Direction::Backward
            }
        );
        assert_eq!(surface.last_request().unwrap().top, 1000.0);
    }

    #[test]
    fn test_missing_target_geometry_passes_through() {
        let mut controller = mounted(&config());
        let mut surface = layout(1392.0, 808.0);
        surface.remove(&SectionId::new("about"));

        assert_eq!(
            controller.handle(Gesture::wheel(100.0), &mut surface),
            Outcome::PassThrough(PassReason::MissingGeometry)
        );
        assert!(!controller.is_paging());
    }

    #[test]
    fn test_narrow_viewport_scrolls_natively() {
        let mut controller = mounted(&config());
        let mut surface = layout(1392.0, 808.0);
        surface.set_viewport(Viewport::new(1392.0, 640.0, 808.0));
        assert_eq!(
            controller.handle(Gesture::wheel(100.0), &mut surface),
            Outcome::PassThrough(PassReason::NarrowViewport)
        );
    }

    #[test]
    fn test_attach_failure_fails_closed() {
        let mut controller =
            PagingController::new(SectionOrder::reference(), &config(), ManualTimer::new());
        let mut binding = FakeBinding {
            fail_attach: true,
            ..Default::default()
        };
        assert!(!controller.mount(&mut binding));
        assert!(!controller.is_attached());

        let mut surface = layout(1392.0, 808.0);
        assert_eq!(
            controller.handle(Gesture::wheel(100.0), &mut surface),
            Outcome::PassThrough(PassReason::Detached)
        );
    }

    #[test]
    fn test_unmount_cancels_pending_release() {
        let mut controller = mounted(&config());
        let mut binding = FakeBinding {
            fail_detach: true,
            attached: true,
            ..Default::default()
        };
        let mut surface = layout(1392.0, 808.0);
        let mut overlay = controller.subscribe();

        controller.handle(Gesture::wheel(100.0), &mut surface);
        assert_eq!(controller.timer().pending(), 1);
        assert_eq!(*overlay.borrow_and_update(), PagingState::Paging);

        controller.unmount(&mut binding);
        assert!(!binding.attached);
        assert!(!controller.is_attached());
        assert_eq!(controller.timer().pending(), 0);
        assert_eq!(*overlay.borrow_and_update(), PagingState::Idle);

        assert_eq!(
            controller.handle(Gesture::key(NavKey::ArrowUp), &mut surface),
            Outcome::PassThrough(PassReason::Detached)
        );
    }

    #[test]
    fn test_timer_release_ignores_scroll_end() {
        let mut controller = mounted(&config());
        let mut surface = layout(1392.0, 808.0);
        controller.handle(Gesture::wheel(100.0), &mut surface);

        assert!(!controller.scroll_finished());
        assert!(controller.is_paging());
    }

    #[test]
    fn test_scroll_end_release_with_timer_fallback() {
        let config = PagingConfig {
            release: ReleaseStrategy::ScrollEnd,
            ..config()
        };
        let mut controller = mounted(&config);
        let mut surface = layout(1392.0, 808.0).with_jump_on_scroll(true);

        controller.handle(Gesture::wheel(100.0), &mut surface);
        advance(&mut controller, Duration::from_millis(300));
        assert!(controller.scroll_finished());
        assert!(!controller.is_paging());

        // second cycle starts before the first cycle's timer fires
        assert!(controller
            .handle(Gesture::key(NavKey::PageDown), &mut surface)
            .suppresses_default());
        advance(&mut controller, Duration::from_millis(450));
        assert!(controller.is_paging(), "stale timer released a newer cycle");

        advance(&mut controller, Duration::from_millis(300));
        assert!(!controller.is_paging());
    }

    #[test]
    fn test_navigate_to_skips_lock() {
        let mut controller = mounted(&config());
        let mut surface = layout(0.0, 800.0);

        assert!(controller.navigate_to(4, &mut surface));
        assert_eq!(surface.last_request().unwrap().section.as_str(), "contact");
        assert!(!controller.is_paging());
        assert!(!controller.navigate_to(9, &mut surface));
    }

    #[test]
    fn test_active_section_tracks_manual_scroll() {
        let controller = mounted(&config());
        let mut surface = layout(0.0, 800.0);
        assert_eq!(controller.active_section(&surface).as_str(), "hero");
        surface.scroll_to(3400.0);
        assert_eq!(controller.active_section(&surface).as_str(), "experience");
    }
}
