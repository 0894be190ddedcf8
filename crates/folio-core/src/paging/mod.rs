//! Section paging: turns wheel and keyboard input into whole-section jumps.
//!
//! The decision logic is independent of any rendering surface. Hosts plug in
//! through four narrow traits:
//!
//! - [`LayoutProvider`] answers geometry queries
//! - [`ScrollAnimator`] performs the smooth scroll
//! - [`SettleTimer`] schedules the lock release
//! - [`InputBinding`] attaches and detaches the input listeners
//!
//! ```ignore
//! let mut controller = PagingController::new(order, &config.paging, timer);
//! controller.mount(&mut binding);
//!
//! // per input event
//! let outcome = controller.handle(gesture, &mut surface);
//! if outcome.suppresses_default() { /* swallow the event */ }
//!
//! // when the timer fires
//! controller.settle(ticket);
//! ```

pub mod animator;
pub mod boundary;
pub mod controller;
pub mod gate;
pub mod layout;
pub mod lock;
pub mod resolver;
pub mod section;
pub mod timer;

pub use animator::{ScrollAnimator, ScrollRequest};
pub use boundary::{boundary_permits, BoundaryCheck};
pub use controller::{InputBinding, Outcome, PagingController};
pub use gate::{
    ControlKind, Direction, EventTarget, GateContext, Gesture, GestureGate, KeyGesture, NavKey,
    PassReason, Verdict, WheelGesture,
};
pub use layout::{LayoutProvider, SectionGeometry, StaticLayout, Viewport};
pub use lock::{PagingLock, PagingState, SettleTicket};
pub use resolver::{active_section_index, resolve_active_index, ActiveSectionResolver};
pub use section::{SectionId, SectionOrder};
pub use timer::{ManualTimer, SettleTimer};
