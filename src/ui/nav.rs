//! Navigation header.
//!
//! A single header line: home and topics links on the left, then the
//! auth link, which reads "Профиль" while logged in and "Войти" otherwise.

use crate::app::App;
use crate::route::Route;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let auth_link = if app.session.is_authenticated() {
        Route::Profile
    } else {
        Route::Login
    };

    let entries: [(Route, &str); 3] = [
        (Route::Home, "1"),
        (Route::News, "2"),
        (auth_link, "3"),
    ];

    let mut spans = vec![Span::styled(" ", app.theme.header)];
    for (route, key) in entries {
        let style = if route == app.route {
            app.theme.header_active
        } else {
            app.theme.header
        };
        spans.push(Span::styled(format!(" {} [{}] ", route.title(), key), style));
        spans.push(Span::styled("│", app.theme.header));
    }
    spans.pop(); // no trailing separator

    f.render_widget(Paragraph::new(Line::from(spans)).style(app.theme.header), area);
}
