//! Smooth scrolling for the terminal page.
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and interpolation helpers
//! - `config` - configuration (types live in folio-core)
//! - `animation` - the animator combining the above
//!
//! ```ignore
//! let mut scroll = SmoothScroll::new(config.ui.scroll.clone());
//! scroll.scroll_to(target_row, max_scroll);
//!
//! // every frame
//! let row = scroll.update(max_scroll);
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::SmoothScroll;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
