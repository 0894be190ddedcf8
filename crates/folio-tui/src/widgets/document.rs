use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::content::{text_width, wrap, LineKind, SectionContent, MARGIN};
use crate::theme::Theme;

/// The page itself: every section stacked, cut to the visible rows
pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let scroll = app.surface.scroll_row();
        let first = scroll as u32;
        let last = first + area.height as u32;
        let width = text_width(area.width);

        let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
        for (block, section) in app.surface.blocks().iter().zip(&app.sections) {
            let top = block.top as u32;
            let bottom = top + block.height as u32;
            if bottom <= first || top >= last {
                continue;
            }

            let rows = section_rows(section, width, block.height, &app.theme);
            let skip = first.saturating_sub(top) as usize;
            let take = (last.min(bottom) - top.max(first)) as usize;
            lines.extend(rows.into_iter().skip(skip).take(take));
        }

        let bg = Style::default().bg(app.theme.bg0);
        frame.render_widget(Paragraph::new(lines).style(bg), area);
    }
}

/// One line per row of the section block, padded to `height`
fn section_rows(
    section: &SectionContent,
    width: u16,
    height: u16,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let margin = " ".repeat(MARGIN as usize);
    let mut rows = vec![Line::default()];

    for line in &section.lines {
        let style = theme.line_style(line.kind);
        for text in wrap(&line.text, width) {
            if line.kind == LineKind::Blank {
                rows.push(Line::default());
            } else {
                rows.push(Line::from(vec![
                    Span::raw(margin.clone()),
                    Span::styled(text, style),
                ]));
            }
        }
    }

    rows.resize(height as usize, Line::default());
    rows
}
