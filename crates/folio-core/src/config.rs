use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Address opened by the contact action
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            contact_email: default_contact_email(),
        }
    }
}

/// How the paging lock is released after a page jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseStrategy {
    /// Release after the fixed settle duration only
    #[default]
    Timer,
    /// Release on the host's scroll-end notification, timer as fallback
    ScrollEnd,
}

/// Section paging controller parameters.
///
/// All thresholds are in host layout units (CSS pixels in a browser,
/// pixel-equivalents in the terminal host).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Navigation order of section ids
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    /// Fraction of the viewport height used as the active-section probe
    #[serde(default = "default_reference_ratio")]
    pub reference_ratio: f64,
    /// Viewports narrower than this scroll natively
    #[serde(default = "default_min_viewport_width")]
    pub min_viewport_width: f64,
    /// Wheel deltas below this magnitude are treated as jitter
    #[serde(default = "default_wheel_noise_threshold")]
    pub wheel_noise_threshold: f64,
    /// Slack allowed when deciding a section edge has been reached
    #[serde(default = "default_edge_tolerance")]
    pub edge_tolerance: f64,
    /// Time the paging lock is held after a jump
    #[serde(default = "default_settle_duration_ms")]
    pub settle_duration_ms: u64,
    #[serde(default)]
    pub release: ReleaseStrategy,
    /// Apply the section edge check to keyboard gestures as well as wheel
    #[serde(default)]
    pub keyboard_boundary_check: bool,
    /// Reduced motion override; unset means ask the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            reference_ratio: default_reference_ratio(),
            min_viewport_width: default_min_viewport_width(),
            wheel_noise_threshold: default_wheel_noise_threshold(),
            edge_tolerance: default_edge_tolerance(),
            settle_duration_ms: default_settle_duration_ms(),
            release: ReleaseStrategy::default(),
            keyboard_boundary_check: false,
            reduced_motion: None,
        }
    }
}

impl PagingConfig {
    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }

    /// Resolve the reduced-motion preference once.
    ///
    /// The config value wins; otherwise `FOLIO_REDUCED_MOTION` is read
    /// (`1`, `true`, `yes` and `reduce` count as set).
    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.unwrap_or_else(|| {
            std::env::var(REDUCED_MOTION_ENV)
                .map(|v| parse_motion_flag(&v))
                .unwrap_or(false)
        })
    }

    /// Range checks shared by the config file and scenario overrides
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.reference_ratio) {
            return Err(crate::Error::Config(format!(
                "paging.reference_ratio must be within [0, 1], got {}",
                self.reference_ratio
            )));
        }
        for (name, value) in [
            ("min_viewport_width", self.min_viewport_width),
            ("wheel_noise_threshold", self.wheel_noise_threshold),
            ("edge_tolerance", self.edge_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::Config(format!(
                    "paging.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

pub const REDUCED_MOTION_ENV: &str = "FOLIO_REDUCED_MOTION";

fn parse_motion_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "reduce"
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixel-equivalent height of one terminal row
    #[serde(default = "default_row_height_px")]
    pub row_height_px: u16,
    /// Pixel-equivalent width of one terminal column
    #[serde(default = "default_column_width_px")]
    pub column_width_px: u16,
    /// Wheel delta reported for one notch of the mouse wheel
    #[serde(default = "default_wheel_step_px")]
    pub wheel_step_px: f64,
    /// Rows scrolled by a wheel notch when paging passes it through
    #[serde(default = "default_native_wheel_rows")]
    pub native_wheel_rows: u16,
    /// Navbar switches to its compact form past this scroll offset
    #[serde(default = "default_compact_navbar_after_px")]
    pub compact_navbar_after_px: f64,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            row_height_px: default_row_height_px(),
            column_width_px: default_column_width_px(),
            wheel_step_px: default_wheel_step_px(),
            native_wheel_rows: default_native_wheel_rows(),
            compact_navbar_after_px: default_compact_navbar_after_px(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve for smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll position changes
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one scroll animation
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "q", "G", "<C-c>", "<S-Tab>", "<CR>", "<Esc>", "<Space>"
///
/// Paging keys (PageUp/PageDown, arrows, Space) are fixed and not listed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Open the goto prompt
    #[serde(default = "default_key_goto_prompt")]
    pub goto_prompt: String,
    /// Jump to the first section
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to the last section
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Open a mail client for the contact address
    #[serde(default = "default_key_open_contact")]
    pub open_contact: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            goto_prompt: default_key_goto_prompt(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            open_contact: default_key_open_contact(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_goto_prompt() -> String { "/".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_open_contact() -> String { "m".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_contact_email() -> String {
    "hello@liu.eng".to_string()
}

fn default_sections() -> Vec<String> {
    ["hero", "work", "about", "experience", "contact"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_reference_ratio() -> f64 {
    0.25
}

fn default_min_viewport_width() -> f64 {
    768.0
}

fn default_wheel_noise_threshold() -> f64 {
    8.0
}

fn default_edge_tolerance() -> f64 {
    8.0
}

fn default_settle_duration_ms() -> u64 {
    750
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_row_height_px() -> u16 {
    16
}

fn default_column_width_px() -> u16 {
    8
}

fn default_wheel_step_px() -> f64 {
    100.0
}

fn default_native_wheel_rows() -> u16 {
    3
}

fn default_compact_navbar_after_px() -> f64 {
    50.0
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u16 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaults if it doesn't exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> crate::Result<()> {
        self.paging.validate()?;
        if self.ui.row_height_px == 0 || self.ui.column_width_px == 0 {
            return Err(crate::Error::Config(
                "ui.row_height_px and ui.column_width_px must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }
}
