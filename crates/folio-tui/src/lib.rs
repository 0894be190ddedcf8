pub mod app;
pub mod binding;
pub mod content;
pub mod event;
pub mod input;
pub mod keymap;
pub mod scroll;
pub mod surface;
pub mod theme;
pub mod timer;
pub mod widgets;

pub use app::App;
pub use binding::MouseCapture;
pub use surface::PageSurface;
pub use theme::Theme;
pub use timer::TokioSettleTimer;
