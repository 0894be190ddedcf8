pub mod config;
pub mod error;
pub mod paging;

pub use config::{AppConfig, EasingType, PagingConfig, ReleaseStrategy, ScrollConfig};
pub use error::{Error, Result};
pub use paging::{
    Direction, Gesture, LayoutProvider, PagingController, PagingState, SectionId, SectionOrder,
};
