use ratatui::style::{Color, Modifier, Style};

use crate::content::LineKind;

/// Runtime color palette
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub accent: Color,
    pub active: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Slate dark
        Self {
            bg0: Color::Rgb(0x0f, 0x11, 0x15),
            bg1: Color::Rgb(0x1a, 0x1d, 0x23),
            bg2: Color::Rgb(0x2a, 0x2e, 0x36),
            fg0: Color::Rgb(0xe6, 0xe6, 0xe6),
            fg1: Color::Rgb(0xc8, 0xcc, 0xd4),
            grey0: Color::Rgb(0x5c, 0x63, 0x70),
            grey1: Color::Rgb(0x8b, 0x93, 0xa1),
            accent: Color::Rgb(0x3b, 0x82, 0xf6),
            active: Color::Rgb(0xf5, 0xf5, 0xf5),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }
}

impl Theme {
    /// Text style for a content line
    pub fn line_style(&self, kind: LineKind) -> Style {
        let base = Style::default().bg(self.bg0);
        match kind {
            LineKind::Title => base.fg(self.fg0).add_modifier(Modifier::BOLD),
            LineKind::Heading => base.fg(self.fg0).add_modifier(Modifier::BOLD),
            LineKind::Body => base.fg(self.fg1),
            LineKind::Muted => base.fg(self.grey1),
            LineKind::Accent => base.fg(self.accent),
            LineKind::Blank => base,
        }
    }
}
