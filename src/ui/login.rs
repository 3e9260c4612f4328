//! Login screen.

use crate::app::{App, CredentialField};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use super::helpers::{centered_rect, input_line};

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let form = &app.login;

    let mut lines = vec![
        Line::from(Span::styled("Имя пользователя:", theme.label)),
        input_line(
            &form.username,
            form.field == CredentialField::Username,
            false,
            theme.text,
        ),
        Line::raw(""),
        Line::from(Span::styled("Пароль:", theme.label)),
        input_line(
            &form.password,
            form.field == CredentialField::Password,
            true,
            theme.text,
        ),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(error.clone(), theme.error)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Enter — войти · Ctrl+R — регистрация",
        theme.hint,
    )));

    let rect = centered_rect(52, lines.len() as u16 + 2, area);
    let block = Block::bordered().title(" Вход ").border_style(theme.border_focused);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
