//! Topics screen: the list, the inline edit form, and the add overlay.

use crate::app::{App, TopicField};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use super::helpers::{centered_rect, input_line, truncate};

/// Takes `&mut App`: the add-form overlay records its rendered region so
/// the mouse handler can tell inside from outside.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(area);

    render_header(f, app, chunks[0]);
    render_list(f, app, chunks[1]);

    if app.news.show_add_form {
        render_add_form(f, app);
    } else {
        app.news.add_form_area = None;
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(" Темы", theme.label)];
    // The add affordance only exists for a logged-in user
    if app.session.is_authenticated() {
        spans.push(Span::styled("   [a] Добавить тему", theme.hint));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if app.topics.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(" Пока нет тем.", theme.hint)));
        f.render_widget(empty, area);
        return;
    }

    let text_width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_offset = 0;

    for (i, topic) in app.topics.iter().enumerate() {
        let selected = i == app.news.selected;
        if selected {
            selected_offset = lines.len();
        }

        if app.news.editing_id == Some(topic.id) {
            // The edit form renders in place of the topic it edits
            lines.push(Line::from(Span::styled("   Заголовок:", theme.label)));
            lines.push(indented(input_line(
                &app.news.edit_title,
                app.news.edit_field == TopicField::Title,
                false,
                theme.text,
            )));
            lines.push(Line::from(Span::styled("   Содержание:", theme.label)));
            lines.push(indented(input_line(
                &app.news.edit_content,
                app.news.edit_field == TopicField::Content,
                false,
                theme.text,
            )));
            lines.push(Line::from(Span::styled(
                "   Enter — сохранить · Esc — отмена",
                theme.hint,
            )));
        } else {
            let marker = if selected { " > " } else { "   " };
            let title_style = if selected { theme.border_focused } else { theme.label };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), title_style),
                Span::styled(truncate(&topic.title, text_width), title_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", truncate(&topic.content, text_width)),
                theme.text,
            )));
        }
        lines.push(Line::raw(""));
    }

    // Keep the selection in view; center it once the list overflows
    let visible = area.height as usize;
    let total = lines.len();
    let scroll = if total <= visible {
        0
    } else {
        selected_offset
            .saturating_sub(visible / 2)
            .min(total - visible)
    };

    f.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
}

/// Shift an input line under its label.
fn indented(line: Line<'static>) -> Line<'static> {
    let mut spans = vec![Span::raw("   ")];
    spans.extend(line.spans);
    Line::from(spans)
}

/// Centered overlay with the add form. Its rect is recorded on the app so
/// a mouse press outside of it dismisses the form.
fn render_add_form(f: &mut Frame, app: &mut App) {
    let overlay = centered_rect(56, 10, f.area());
    if overlay.width < 20 || overlay.height < 8 {
        return;
    }
    app.news.add_form_area = Some(overlay);

    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled("Заголовок:", theme.label)),
        input_line(
            &app.news.add_title,
            app.news.add_field == TopicField::Title,
            false,
            theme.text,
        ),
        Line::from(Span::styled("Содержание:", theme.label)),
        input_line(
            &app.news.add_content,
            app.news.add_field == TopicField::Content,
            false,
            theme.text,
        ),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter — добавить новость · Esc — отмена",
            theme.hint,
        )),
    ];

    f.render_widget(Clear, overlay);
    let block = Block::bordered()
        .title(" Добавить тему ")
        .border_style(theme.border_focused);
    f.render_widget(Paragraph::new(lines).block(block), overlay);
}
