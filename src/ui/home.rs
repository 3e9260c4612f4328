//! Home screen.

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
        Line::from(Span::styled("Добро пожаловать на форум.", theme.text)),
        Line::raw(""),
        Line::from(Span::styled(
            "Темы доступны всем, добавление и правка — после входа.",
            theme.text,
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "[2] — темы, [3] — вход или профиль",
            theme.hint,
        )),
    ];

    let rect = centered_rect(56, 9, area);
    let block = Block::bordered()
        .title(" Главная ")
        .border_style(theme.border);
    f.render_widget(Paragraph::new(lines).block(block).centered(), rect);
}
