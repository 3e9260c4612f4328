//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the screen
//! matching the current route and drawing overlays on top.

use crate::app::{App, ConfirmAction};
use crate::route::Route;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use super::{helpers, home, login, nav, news, profile, register, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    nav::render(f, app, chunks[0]);

    match app.route {
        Route::Home => home::render(f, app, chunks[1]),
        Route::Login => login::render(f, app, chunks[1]),
        Route::Register => register::render(f, app, chunks[1]),
        Route::News => news::render(f, app, chunks[1]),
        Route::Profile => profile::render(f, app, chunks[1]),
    }

    status::render(f, app, chunks[2]);

    // Confirmation dialog on top of any screen when active
    if let Some(confirm) = &app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }
}

/// Render a confirmation dialog overlay centered on screen.
fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let text = match confirm {
        ConfirmAction::DeleteTopic { title, .. } => {
            format!(
                "Удалить новость?\n\n\"{}\"\n\n(y/Enter) Удалить  (n/Esc) Отмена",
                helpers::truncate(title, 40)
            )
        }
    };

    let overlay = helpers::centered_rect(50, 7, f.area());
    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text)
        .block(
            Block::bordered()
                .border_style(app.theme.border_focused)
                .title(" Подтверждение "),
        )
        .alignment(Alignment::Center)
        .style(app.theme.text);

    f.render_widget(paragraph, overlay);
}
