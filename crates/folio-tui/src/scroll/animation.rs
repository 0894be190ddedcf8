use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u16, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Row-based smooth scroll state for the page.
///
/// `scroll_to` and `scroll_by` set a target; `update` advances the animation
/// once per frame. The end of every animation is reported once through
/// `take_finished`, which the host forwards as its scroll-end signal.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
    /// Native scroll deltas batched until the next frame
    pending_delta: i32,
    finished: bool,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl SmoothScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
            finished: false,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the next frame has work to do (drives the fast tick rate)
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to an absolute row.
    ///
    /// Replaces any running animation and starts from the visible row.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        // an instant jump (or no move at all) still ends a scroll
        if !self.config.is_smooth() || self.current_scroll == target {
            self.current_scroll = target;
            self.animation = None;
            self.finished = true;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Relative scroll (positive = down), batched per frame
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            self.current_scroll =
                (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance one frame and return the visible row
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let new_target = (self.target_scroll() as i32 + self.pending_delta)
                .clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: Instant::now(),
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
                self.finished = true;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        } else if self.current_scroll > max_scroll {
            // viewport grew or document shrank
            self.current_scroll = max_scroll;
        }

        self.current_scroll
    }

    /// True once after each completed scroll
    pub fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished)
    }

    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}
