//! Bottom status bar: expiring messages, otherwise key hints per screen.

use crate::app::App;
use crate::route::Route;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::borrow::Cow;

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for static hint strings
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.route {
            Route::Home | Route::Profile => {
                Cow::Borrowed(" [1/2/3] переход · [Ctrl+T] тема · [q] выход")
            }
            Route::Login | Route::Register => {
                Cow::Borrowed(" [Tab] поле · [Enter] отправить · [Esc] на главную")
            }
            Route::News => {
                if app.news.show_add_form || app.news.editing_id.is_some() {
                    Cow::Borrowed(" [Tab] поле · [Enter] далее/сохранить · [Esc] закрыть")
                } else if app.session.is_authenticated() {
                    Cow::Borrowed(
                        " [j/k] выбор · [a] добавить · [e] редактировать · [d] удалить · [q] выход",
                    )
                } else {
                    Cow::Borrowed(" [j/k] выбор · [3] войти · [q] выход")
                }
            }
        }
    };

    f.render_widget(Paragraph::new(text).style(app.theme.status_bar), area);
}
