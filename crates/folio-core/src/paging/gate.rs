use std::fmt;

use serde::{Deserialize, Serialize};

/// Paging direction, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Kind of editable control an event target sits inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    TextInput,
    TextArea,
    Select,
    ContentEditable,
}

/// Where an input event is dispatched.
///
/// Hosts resolve the closest enclosing editable control themselves; the gate
/// only needs to know whether there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventTarget {
    #[default]
    Document,
    Control(ControlKind),
}

impl EventTarget {
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, EventTarget::Control(_))
    }
}

/// Keys the controller cares about; everything else is `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavKey {
    PageDown,
    PageUp,
    ArrowDown,
    ArrowUp,
    Space,
    Other,
}

impl NavKey {
    pub fn direction(self) -> Option<Direction> {
        match self {
            NavKey::PageDown | NavKey::ArrowDown | NavKey::Space => Some(Direction::Forward),
            NavKey::PageUp | NavKey::ArrowUp => Some(Direction::Backward),
            NavKey::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGesture {
    /// Vertical delta, positive scrolls toward the end of the document
    pub delta_y: f64,
    /// Modifier that turns the wheel into a zoom gesture (Ctrl)
    #[serde(default)]
    pub zoom_modifier: bool,
    #[serde(default)]
    pub target: EventTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGesture {
    pub key: NavKey,
    #[serde(default)]
    pub target: EventTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Gesture {
    Wheel(WheelGesture),
    Key(KeyGesture),
}

impl Gesture {
    pub fn wheel(delta_y: f64) -> Self {
        Gesture::Wheel(WheelGesture {
            delta_y,
            zoom_modifier: false,
            target: EventTarget::Document,
        })
    }

    pub fn key(key: NavKey) -> Self {
        Gesture::Key(KeyGesture {
            key,
            target: EventTarget::Document,
        })
    }

    pub fn on(mut self, target: EventTarget) -> Self {
        match &mut self {
            Gesture::Wheel(w) => w.target = target,
            Gesture::Key(k) => k.target = target,
        }
        self
    }

    /// No effect on key gestures
    pub fn with_zoom_modifier(mut self) -> Self {
        if let Gesture::Wheel(w) = &mut self {
            w.zoom_modifier = true;
        }
        self
    }

    pub fn target(&self) -> EventTarget {
        match self {
            Gesture::Wheel(w) => w.target,
            Gesture::Key(k) => k.target,
        }
    }

    pub fn is_wheel(&self) -> bool {
        matches!(self, Gesture::Wheel(_))
    }
}

/// Why a gesture was left to native scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassReason {
    /// Listeners are not attached (not mounted, torn down, or attach failed)
    Detached,
    ReducedMotion,
    NarrowViewport,
    ZoomModifier,
    EditableTarget,
    /// A page transition is still in flight
    Paging,
    WheelNoise,
    UnboundKey,
    /// Still room to scroll inside the active section
    MidSection,
    /// Already at the first or last section
    AtEdge,
    MissingGeometry,
}

impl PassReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassReason::Detached => "detached",
            PassReason::ReducedMotion => "reduced-motion",
            PassReason::NarrowViewport => "narrow-viewport",
            PassReason::ZoomModifier => "zoom-modifier",
            PassReason::EditableTarget => "editable-target",
            PassReason::Paging => "paging",
            PassReason::WheelNoise => "wheel-noise",
            PassReason::UnboundKey => "unbound-key",
            PassReason::MidSection => "mid-section",
            PassReason::AtEdge => "at-edge",
            PassReason::MissingGeometry => "missing-geometry",
        }
    }
}

impl fmt::Display for PassReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    PassThrough(PassReason),
    Page(Direction),
}

/// Environment snapshot the gate evaluates against
#[derive(Debug, Clone, Copy)]
pub struct GateContext {
    pub reduced_motion: bool,
    pub viewport_width: f64,
    pub locked: bool,
}

/// Environment checks that run before any geometry is consulted
#[derive(Debug, Clone, Copy)]
pub struct GestureGate {
    min_viewport_width: f64,
    wheel_noise_threshold: f64,
}

impl Default for GestureGate {
    fn default() -> Self {
        Self::new(768.0, 8.0)
    }
}

impl GestureGate {
    pub fn new(min_viewport_width: f64, wheel_noise_threshold: f64) -> Self {
        Self {
            min_viewport_width,
            wheel_noise_threshold,
        }
    }

    /// Checks run in a fixed order; the first failing one names the reason.
    pub fn evaluate(&self, gesture: &Gesture, ctx: &GateContext) -> Verdict {
        use Verdict::PassThrough;

        if ctx.reduced_motion {
            return PassThrough(PassReason::ReducedMotion);
        }
        if ctx.viewport_width < self.min_viewport_width {
            return PassThrough(PassReason::NarrowViewport);
        }
        if let Gesture::Wheel(w) = gesture {
            if w.zoom_modifier {
                return PassThrough(PassReason::ZoomModifier);
            }
        }
        if gesture.target().is_editable() {
            return PassThrough(PassReason::EditableTarget);
        }
        if ctx.locked {
            return PassThrough(PassReason::Paging);
        }

        match gesture {
            Gesture::Wheel(w) => {
                // NaN compares false here and falls through to noise
                if w.delta_y.abs() >= self.wheel_noise_threshold {
                    if w.delta_y > 0.0 {
                        Verdict::Page(Direction::Forward)
                    } else {
                        Verdict::Page(Direction::Backward)
                    }
                } else {
                    PassThrough(PassReason::WheelNoise)
                }
            }
            Gesture::Key(k) => match k.key.direction() {
                Some(direction) => Verdict::Page(direction),
                None => PassThrough(PassReason::UnboundKey),
            },
        }
    }
}
