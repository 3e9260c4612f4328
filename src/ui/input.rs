//! Input handling for the TUI.
//!
//! This module processes keyboard and mouse input and dispatches to the
//! appropriate handler based on the current route and form state.

use crate::app::{App, AppEvent, ConfirmAction, CredentialField, TopicField};
use crate::auth::register;
use crate::route::Route;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tokio::sync::mpsc;

use super::Action;

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on the current screen.
/// The confirmation dialog captures all keys while visible.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if app.pending_confirm.is_some() {
        return handle_confirm_input(app, code);
    }

    // Global chords work on every screen, including inside text fields
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('q') => return Ok(Action::Quit),
            KeyCode::Char('t') => {
                let name = app.cycle_theme();
                app.set_status(format!("Тема: {}", name));
                return Ok(Action::Continue);
            }
            _ => {}
        }
    }

    match app.route {
        Route::Home => Ok(handle_browse_keys(app, code)),
        Route::Profile => handle_profile_input(app, code),
        Route::Login => handle_login_input(app, code, modifiers),
        Route::Register => Ok(handle_register_input(app, code, modifiers, event_tx)),
        Route::News => handle_news_input(app, code, modifiers),
    }
}

/// Mouse input. The only mouse interaction is dismissing the add form by
/// pressing outside its rendered region; the draft itself is kept.
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(_)) {
        return;
    }
    if app.route == Route::News && app.news.show_add_form {
        let inside = app
            .news
            .add_form_area
            .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
        if !inside {
            app.dismiss_add_form();
            app.needs_redraw = true;
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Keys available on screens without text input: quit and navigation.
fn handle_browse_keys(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('1') => app.navigate(Route::Home),
        KeyCode::Char('2') => app.navigate(Route::News),
        KeyCode::Char('3') => {
            // Mirrors the header link: profile when logged in, else login
            if app.session.is_authenticated() {
                app.navigate(Route::Profile);
            } else {
                app.navigate(Route::Login);
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Apply a key to a text field. Returns true if the field changed.
fn edit_text(field: &mut String, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            field.push(c);
            true
        }
        KeyCode::Backspace => field.pop().is_some(),
        _ => false,
    }
}

fn toggle_credential_field(field: &mut CredentialField) {
    *field = match field {
        CredentialField::Username => CredentialField::Password,
        CredentialField::Password => CredentialField::Username,
    };
}

// ============================================================================
// Screen handlers
// ============================================================================

fn handle_login_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    // Link to the registration screen
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('r') {
        app.navigate(Route::Register);
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Esc => app.navigate(Route::Home),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            toggle_credential_field(&mut app.login.field)
        }
        KeyCode::Enter => app.submit_login()?,
        _ => {
            let field = match app.login.field {
                CredentialField::Username => &mut app.login.username,
                CredentialField::Password => &mut app.login.password,
            };
            edit_text(field, code, modifiers);
        }
    }
    Ok(Action::Continue)
}

fn handle_register_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Link back to the login screen
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('l') {
        app.navigate(Route::Login);
        return Action::Continue;
    }

    match code {
        KeyCode::Esc => app.navigate(Route::Home),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            toggle_credential_field(&mut app.register.field)
        }
        KeyCode::Enter => spawn_register(app, event_tx),
        _ => {
            let field = match app.register.field {
                CredentialField::Username => &mut app.register.username,
                CredentialField::Password => &mut app.register.password,
            };
            edit_text(field, code, modifiers);
        }
    }
    Action::Continue
}

fn handle_profile_input(app: &mut App, code: KeyCode) -> Result<Action> {
    if code == KeyCode::Enter {
        app.logout()?;
        return Ok(Action::Continue);
    }
    Ok(handle_browse_keys(app, code))
}

fn handle_news_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    if app.news.show_add_form {
        return handle_add_form_input(app, code, modifiers);
    }
    if app.news.editing_id.is_some() {
        return handle_edit_form_input(app, code, modifiers);
    }

    match code {
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        // Mutating affordances exist only for a logged-in user; this is a
        // UI gate, not a data-layer one.
        KeyCode::Char('a') if app.session.is_authenticated() => app.toggle_add_form(),
        KeyCode::Char('e') if app.session.is_authenticated() => app.start_edit_selected(),
        KeyCode::Char('d') if app.session.is_authenticated() => app.request_delete_selected(),
        _ => return Ok(handle_browse_keys(app, code)),
    }
    Ok(Action::Continue)
}

fn handle_add_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    match code {
        // Cancel hides the form like a click outside it; the draft is kept
        KeyCode::Esc => app.dismiss_add_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            app.news.add_field = match app.news.add_field {
                TopicField::Title => TopicField::Content,
                TopicField::Content => TopicField::Title,
            }
        }
        KeyCode::Enter => match app.news.add_field {
            TopicField::Title => app.news.add_field = TopicField::Content,
            TopicField::Content => app.submit_add()?,
        },
        _ => {
            let field = match app.news.add_field {
                TopicField::Title => &mut app.news.add_title,
                TopicField::Content => &mut app.news.add_content,
            };
            edit_text(field, code, modifiers);
        }
    }
    Ok(Action::Continue)
}

fn handle_edit_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    match code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Tab | KeyCode::BackTab => {
            app.news.edit_field = match app.news.edit_field {
                TopicField::Title => TopicField::Content,
                TopicField::Content => TopicField::Title,
            }
        }
        KeyCode::Enter => match app.news.edit_field {
            TopicField::Title => app.news.edit_field = TopicField::Content,
            TopicField::Content => app.save_edit()?,
        },
        _ => {
            let field = match app.news.edit_field {
                TopicField::Title => &mut app.news.edit_title,
                TopicField::Content => &mut app.news.edit_content,
            };
            edit_text(field, code, modifiers);
        }
    }
    Ok(Action::Continue)
}

/// Handle input while the delete confirmation is visible.
fn handle_confirm_input(app: &mut App, code: KeyCode) -> Result<Action> {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(ConfirmAction::DeleteTopic { id, .. }) = app.pending_confirm.take() {
                app.delete_topic(id)?;
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            // Declined: no state change
            app.pending_confirm = None;
        }
        _ => {}
    }
    Ok(Action::Continue)
}

// ============================================================================
// Background work
// ============================================================================

/// Spawn the registration request as a background task.
///
/// The UI stays responsive; the result arrives as an `AppEvent`. There is
/// no cancellation — a response landing after the user navigated away is
/// still applied.
fn spawn_register(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if app.register.in_flight {
        return;
    }
    // Required fields: an empty pair never leaves the client, and no
    // message is shown for it
    if app.register.username.is_empty() || app.register.password.is_empty() {
        return;
    }

    app.register.error = None;
    app.register.in_flight = true;

    let client = app.http_client.clone();
    let base_url = app.api_base_url.clone();
    let username = app.register.username.clone();
    let password = app.register.password.clone();
    let tx = event_tx.clone();

    tracing::debug!(username = %username, "Spawning registration request");

    tokio::spawn(async move {
        let result = register(&client, &base_url, &username, &password).await;
        if tx
            .send(AppEvent::RegistrationCompleted { result })
            .await
            .is_err()
        {
            tracing::warn!("Failed to deliver registration result (receiver dropped)");
        }
    });
}
