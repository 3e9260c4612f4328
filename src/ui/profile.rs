//! Profile screen (guarded route).

use crate::app::App;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use super::helpers::centered_rect;

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("Это страница вашего профиля.", theme.text)),
        Line::raw(""),
        Line::from(Span::styled("[Enter] Выйти из профиля", theme.label)),
    ];

    let rect = centered_rect(44, 7, area);
    let block = Block::bordered()
        .title(" Профиль ")
        .border_style(theme.border);
    f.render_widget(Paragraph::new(lines).block(block).centered(), rect);
}
