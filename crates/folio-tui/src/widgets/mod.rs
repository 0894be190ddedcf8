pub mod navbar;
mod document;
mod overlay;
mod prompt;
mod status_bar;

pub use document::DocumentWidget;
pub use navbar::NavbarWidget;
pub use overlay::OverlayWidget;
pub use prompt::PromptWidget;
pub use status_bar::StatusBarWidget;
