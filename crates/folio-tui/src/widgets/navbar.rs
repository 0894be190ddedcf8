use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

const BRAND_FULL: &str = " Liu . Engineering ";
const BRAND_COMPACT: &str = " L. ";

pub struct NavbarWidget;

impl NavbarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let active = app.active_index();
        let titles: Vec<&str> = app.sections.iter().map(|s| s.title.as_str()).collect();
        let labels = link_labels(&titles);
        let links_width: u16 = labels.iter().map(|l| l.width() as u16).sum();

        let brand = if app.navbar_compact() {
            BRAND_COMPACT
        } else {
            BRAND_FULL
        };
        let gap = area
            .width
            .saturating_sub(brand.width() as u16 + links_width) as usize;

        let base = Style::default().bg(theme.bg1);
        let mut spans = vec![
            Span::styled(brand, base.fg(theme.fg0).add_modifier(Modifier::BOLD)),
            Span::styled(" ".repeat(gap), base),
        ];
        for (index, label) in labels.into_iter().enumerate() {
            let style = if index == active {
                base.fg(theme.active).bg(theme.bg2).add_modifier(Modifier::BOLD)
            } else {
                base.fg(theme.grey1)
            };
            spans.push(Span::styled(label, style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
    }
}

fn link_labels(titles: &[&str]) -> Vec<String> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| format!(" {} {} ", i + 1, title))
        .collect()
}

/// Column ranges of the section links, right-aligned in `area`
fn link_ranges(titles: &[&str], area: Rect) -> Vec<(u16, u16)> {
    let labels = link_labels(titles);
    let total: u16 = labels.iter().map(|l| l.width() as u16).sum();
    let mut x = area.x + area.width.saturating_sub(total);

    labels
        .iter()
        .map(|label| {
            let start = x;
            x = x.saturating_add(label.width() as u16);
            (start, x)
        })
        .collect()
}

/// Section index of the link under `column`
pub fn hit_test(titles: &[&str], area: Rect, column: u16) -> Option<usize> {
    link_ranges(titles, area)
        .iter()
        .position(|&(start, end)| column >= start && column < end)
}
