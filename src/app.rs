//! Central application state.
//!
//! One `App` owns the current route, the in-memory topic collection (the
//! working copy of what the store persists), the transient form drafts,
//! and the session/verifier handles. All mutation goes through methods
//! here; the UI layer only routes input and renders.

use crate::auth::{check_route, CredentialVerifier, GuardDecision, RegisterError, Session};
use crate::config::Config;
use crate::route::Route;
use crate::store::{next_topic_id, KeyValueStore, Topic, TopicStore};
use crate::theme::{Theme, ThemeVariant};
use anyhow::Result;
use ratatui::layout::Rect;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

/// Message shown when the submitted credential pair does not verify.
pub const LOGIN_ERROR_MESSAGE: &str = "Имя пользователя или пароль введены неверно!";

// ============================================================================
// Form State
// ============================================================================

/// Which input of a username/password form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialField {
    #[default]
    Username,
    Password,
}

/// Which input of a topic form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicField {
    #[default]
    Title,
    Content,
}

/// Login screen state: `Idle` until submit, then either authenticated
/// (route changes) or rejected (error message set, still idle).
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub field: CredentialField,
}

/// Registration screen state. `in_flight` is set while the request runs;
/// there is no cancellation — a completion that arrives after the user
/// navigated away is applied anyway.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub field: CredentialField,
    pub in_flight: bool,
}

/// Transient state of the topics screen.
///
/// The add draft and the edit draft are independent. Dismissing the add
/// form (Esc or a click outside it) only hides it — the draft text stays,
/// so reopening the form shows what was typed. Only a successful add
/// clears it. The edit draft is a single slot: starting an edit on
/// another topic silently replaces the previous target.
#[derive(Debug, Default)]
pub struct NewsState {
    pub selected: usize,
    pub show_add_form: bool,
    pub add_title: String,
    pub add_content: String,
    pub add_field: TopicField,
    /// Screen region of the add form from the last render, for
    /// outside-click dismissal.
    pub add_form_area: Option<Rect>,
    pub editing_id: Option<i64>,
    pub edit_title: String,
    pub edit_content: String,
    pub edit_field: TopicField,
}

// ============================================================================
// Dialogs and Events
// ============================================================================

/// Pending confirmation for destructive operations.
pub enum ConfirmAction {
    /// Remove a topic from the collection.
    DeleteTopic { id: i64, title: String },
}

/// Events from background tasks.
pub enum AppEvent {
    /// The registration request finished.
    RegistrationCompleted { result: Result<(), RegisterError> },
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub session: Session,
    pub store: TopicStore,
    pub verifier: Box<dyn CredentialVerifier>,
    pub http_client: reqwest::Client,
    pub api_base_url: String,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: Theme,

    // Current screen
    pub route: Route,

    // Working copy of the persisted topic collection
    pub topics: Vec<Topic>,

    // Per-screen state
    pub news: NewsState,
    pub login: LoginForm,
    pub register: RegisterForm,

    /// Pending confirmation dialog. When set, the UI renders an overlay
    /// and input is routed to the confirmation handler.
    pub pending_confirm: Option<ConfirmAction>,

    // Status message with expiry — Cow avoids allocation for static literals
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        verifier: Box<dyn CredentialVerifier>,
        config: &Config,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .build()?;

        let session = Session::new(Arc::clone(&kv));
        let store = TopicStore::new(kv);
        let topics = store.load()?;

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, falling back to dark");
            ThemeVariant::Dark
        });

        Ok(Self {
            session,
            store,
            verifier,
            http_client,
            api_base_url: config.api_base_url.clone(),
            theme_variant,
            theme: theme_variant.theme(),
            route: Route::Home,
            topics,
            news: NewsState::default(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            pending_confirm: None,
            status_message: None,
            needs_redraw: true,
        })
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to a route, applying the guard and mount redirects.
    ///
    /// A guarded route swaps its target silently — no error is shown.
    /// The auth screens redirect to the profile when already logged in,
    /// and the topics screen re-reads the store on entry.
    pub fn navigate(&mut self, route: Route) {
        let mut target = match check_route(route, &self.session) {
            GuardDecision::Allow => route,
            GuardDecision::Redirect(to) => {
                tracing::debug!(
                    requested = route.as_path(),
                    redirect = to.as_path(),
                    "Route guard redirected"
                );
                to
            }
        };

        if matches!(target, Route::Login | Route::Register) && self.session.is_authenticated() {
            target = Route::Profile;
        }

        if target == Route::News {
            self.enter_news();
        }

        self.route = target;
        self.needs_redraw = true;
    }

    /// Re-read the store and reset transient form state on entry to the
    /// topics screen, so every visit starts from what is persisted.
    fn enter_news(&mut self) {
        match self.store.load() {
            Ok(topics) => self.topics = topics,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load topics");
                self.set_status("Не удалось загрузить темы");
            }
        }
        self.news = NewsState::default();
        self.clamp_selection();
    }

    // ========================================================================
    // Login / Logout
    // ========================================================================

    /// Submit the login form.
    ///
    /// A verified pair sets the session flag and moves to the profile;
    /// anything else leaves the flag untouched and shows the rejection
    /// message. There is no retry limit.
    pub fn submit_login(&mut self) -> Result<()> {
        if self.verifier.verify(&self.login.username, &self.login.password) {
            self.session.set_authenticated(true)?;
            self.login = LoginForm::default();
            self.navigate(Route::Profile);
        } else {
            tracing::debug!(username = %self.login.username, "Login rejected");
            self.login.error = Some(LOGIN_ERROR_MESSAGE.to_string());
        }
        Ok(())
    }

    /// Clear the session flag and return to the login screen.
    pub fn logout(&mut self) -> Result<()> {
        self.session.set_authenticated(false)?;
        self.navigate(Route::Login);
        Ok(())
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Apply the outcome of a finished registration request.
    ///
    /// The request is not cancellable, so this may run after the user
    /// navigated away from the registration screen; the state is updated
    /// regardless.
    pub fn apply_registration_result(&mut self, result: Result<(), RegisterError>) {
        self.register.in_flight = false;
        match result {
            Ok(()) => {
                if let Err(e) = self.session.set_authenticated(true) {
                    tracing::error!(error = %e, "Registered but failed to persist session flag");
                    self.set_status(format!("Ошибка: {}", e));
                    return;
                }
                self.register = RegisterForm::default();
                self.navigate(Route::Profile);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                self.register.error = Some(e.user_message().to_string());
            }
        }
        self.needs_redraw = true;
    }

    // ========================================================================
    // Topics: add
    // ========================================================================

    /// Toggle the add form's visibility. The draft is untouched either way.
    pub fn toggle_add_form(&mut self) {
        self.news.show_add_form = !self.news.show_add_form;
        if self.news.show_add_form {
            self.news.add_field = TopicField::Title;
        }
    }

    /// Hide the add form without clearing the draft (outside-click / Esc
    /// path). Reopening the form shows the stale, not-yet-submitted text.
    pub fn dismiss_add_form(&mut self) {
        self.news.show_add_form = false;
    }

    /// Submit the add form.
    ///
    /// Empty title or content is a silent no-op — the fields are required
    /// but there is no message, and no trimming beyond presence. Success
    /// appends, persists the whole collection, clears the draft and
    /// closes the form.
    pub fn submit_add(&mut self) -> Result<()> {
        if self.news.add_title.is_empty() || self.news.add_content.is_empty() {
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp_millis();
        let id = next_topic_id(now, self.topics.iter().map(|t| t.id).max());

        let mut updated = self.topics.clone();
        updated.push(Topic {
            id,
            title: self.news.add_title.clone(),
            content: self.news.add_content.clone(),
        });
        self.store.save(&updated)?;
        self.topics = updated;

        self.news.add_title.clear();
        self.news.add_content.clear();
        self.news.add_field = TopicField::Title;
        self.news.show_add_form = false;
        tracing::info!(id, "Topic added");
        Ok(())
    }

    // ========================================================================
    // Topics: delete
    // ========================================================================

    /// Ask for confirmation before deleting the selected topic.
    pub fn request_delete_selected(&mut self) {
        if let Some(topic) = self.topics.get(self.news.selected) {
            self.pending_confirm = Some(ConfirmAction::DeleteTopic {
                id: topic.id,
                title: topic.title.clone(),
            });
        }
    }

    /// Remove the topic with the given id and persist.
    ///
    /// A non-existent id is a no-op: the collection is not rewritten.
    pub fn delete_topic(&mut self, id: i64) -> Result<()> {
        if !self.topics.iter().any(|t| t.id == id) {
            return Ok(());
        }
        let updated: Vec<Topic> = self.topics.iter().filter(|t| t.id != id).cloned().collect();
        self.store.save(&updated)?;
        self.topics = updated;
        self.clamp_selection();
        tracing::info!(id, "Topic deleted");
        Ok(())
    }

    // ========================================================================
    // Topics: edit
    // ========================================================================

    /// Copy the selected topic into the edit draft.
    ///
    /// The draft is a single slot, so this silently replaces any edit
    /// already in progress on another topic.
    pub fn start_edit_selected(&mut self) {
        if let Some(topic) = self.topics.get(self.news.selected) {
            self.news.editing_id = Some(topic.id);
            self.news.edit_title = topic.title.clone();
            self.news.edit_content = topic.content.clone();
            self.news.edit_field = TopicField::Title;
        }
    }

    /// Overwrite the edited topic's title and content from the draft,
    /// persist, and leave edit mode. The id is never touched.
    pub fn save_edit(&mut self) -> Result<()> {
        let editing_id = match self.news.editing_id {
            Some(id) => id,
            None => return Ok(()),
        };

        let updated: Vec<Topic> = self
            .topics
            .iter()
            .map(|t| {
                if t.id == editing_id {
                    Topic {
                        id: t.id,
                        title: self.news.edit_title.clone(),
                        content: self.news.edit_content.clone(),
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        self.store.save(&updated)?;
        self.topics = updated;

        self.cancel_edit();
        tracing::info!(id = editing_id, "Topic updated");
        Ok(())
    }

    /// Discard the edit draft without persisting anything.
    pub fn cancel_edit(&mut self) {
        self.news.editing_id = None;
        self.news.edit_title.clear();
        self.news.edit_content.clear();
        self.news.edit_field = TopicField::Title;
    }

    // ========================================================================
    // Topic list selection
    // ========================================================================

    pub fn selected_topic(&self) -> Option<&Topic> {
        self.topics.get(self.news.selected)
    }

    pub fn nav_up(&mut self) {
        self.news.selected = self.news.selected.saturating_sub(1);
    }

    pub fn nav_down(&mut self) {
        if !self.topics.is_empty() {
            let max_index = self.topics.len() - 1;
            self.news.selected = self.news.selected.saturating_add(1).min(max_index);
        }
    }

    /// Clamp the selection after any operation that shrank the list.
    pub fn clamp_selection(&mut self) {
        self.news.selected = if self.topics.is_empty() {
            0
        } else {
            self.news.selected.min(self.topics.len() - 1)
        };
    }

    // ========================================================================
    // Status and theme
    // ========================================================================

    /// Set status message (auto-expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if older than 3 seconds.
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Cycle to the next theme variant, returning its name for display.
    pub fn cycle_theme(&mut self) -> &'static str {
        self.theme_variant = self.theme_variant.next();
        self.theme = self.theme_variant.theme();
        self.needs_redraw = true;
        self.theme_variant.name()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::store::{MemoryStore, NEWS_KEY};
    use tokio::time::{self, Duration};

    fn test_app() -> (Arc<MemoryStore>, App) {
        let kv = Arc::new(MemoryStore::new());
        let app = App::new(
            Arc::clone(&kv) as Arc<dyn KeyValueStore>,
            Box::new(StaticCredentials::default()),
            &Config::default(),
        )
        .unwrap();
        (kv, app)
    }

    fn add_topic(app: &mut App, title: &str, content: &str) {
        app.news.add_title = title.to_string();
        app.news.add_content = content.to_string();
        app.submit_add().unwrap();
    }

    // Login

    #[tokio::test]
    async fn test_login_success_sets_flag_and_route() {
        let (kv, mut app) = test_app();
        app.login.username = "admin".to_string();
        app.login.password = "12345".to_string();

        app.submit_login().unwrap();

        assert_eq!(kv.get("isAuth").unwrap(), Some("true".to_string()));
        assert_eq!(app.route, Route::Profile);
        assert!(app.login.username.is_empty()); // form cleared
    }

    #[tokio::test]
    async fn test_login_mismatch_shows_message_and_leaves_flag_unset() {
        let (kv, mut app) = test_app();
        app.login.username = "admin".to_string();
        app.login.password = "wrong".to_string();

        app.submit_login().unwrap();

        assert_eq!(kv.get("isAuth").unwrap(), None);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.login.error.as_deref(), Some(LOGIN_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_login_route_redirects_to_profile_when_authenticated() {
        let (_kv, mut app) = test_app();
        app.session.set_authenticated(true).unwrap();

        app.navigate(Route::Login);
        assert_eq!(app.route, Route::Profile);

        app.navigate(Route::Register);
        assert_eq!(app.route, Route::Profile);
    }

    #[tokio::test]
    async fn test_logout_writes_false_and_returns_to_login() {
        let (kv, mut app) = test_app();
        app.session.set_authenticated(true).unwrap();

        app.logout().unwrap();

        assert_eq!(kv.get("isAuth").unwrap(), Some("false".to_string()));
        assert_eq!(app.route, Route::Login);
    }

    // Route guard

    #[tokio::test]
    async fn test_profile_guard_silently_redirects_to_login() {
        let (_kv, mut app) = test_app();
        app.navigate(Route::Profile);
        assert_eq!(app.route, Route::Login);
        assert!(app.status_message.is_none()); // silent
    }

    // Add

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let (kv, mut app) = test_app();
        add_topic(&mut app, "Hello", "World");

        assert_eq!(app.topics.len(), 1);
        assert_eq!(app.topics[0].title, "Hello");
        assert_eq!(app.topics[0].content, "World");
        assert!(!app.news.show_add_form);
        assert!(app.news.add_title.is_empty()); // draft cleared on success

        // Persisted immediately, not on a schedule
        let raw = kv.get(NEWS_KEY).unwrap().unwrap();
        assert!(raw.contains("Hello"));
    }

    #[tokio::test]
    async fn test_add_assigns_distinct_increasing_ids() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "a", "1");
        add_topic(&mut app, "b", "2");
        add_topic(&mut app, "c", "3");

        assert!(app.topics[0].id < app.topics[1].id);
        assert!(app.topics[1].id < app.topics[2].id);
        // New entries go to the end
        assert_eq!(app.topics[2].title, "c");
    }

    #[tokio::test]
    async fn test_add_with_empty_field_is_a_noop() {
        let (kv, mut app) = test_app();

        app.news.show_add_form = true;
        app.news.add_title = "only a title".to_string();
        app.submit_add().unwrap();

        assert!(app.topics.is_empty());
        assert_eq!(kv.get(NEWS_KEY).unwrap(), None); // nothing persisted
        assert!(app.news.show_add_form); // form stays open
        assert_eq!(app.news.add_title, "only a title"); // draft untouched
    }

    #[tokio::test]
    async fn test_dismiss_add_form_keeps_draft() {
        let (_kv, mut app) = test_app();
        app.news.show_add_form = true;
        app.news.add_title = "черновик".to_string();
        app.news.add_content = "текст".to_string();

        app.dismiss_add_form();

        assert!(!app.news.show_add_form);
        // Visibility only — reopening shows the stale draft
        assert_eq!(app.news.add_title, "черновик");
        assert_eq!(app.news.add_content, "текст");
    }

    // Delete

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "a", "1");
        add_topic(&mut app, "b", "2");
        add_topic(&mut app, "c", "3");
        let victim = app.topics[1].id;

        app.delete_topic(victim).unwrap();

        assert_eq!(app.topics.len(), 2);
        assert!(app.topics.iter().all(|t| t.id != victim));
        assert_eq!(app.topics[0].title, "a");
        assert_eq!(app.topics[1].title, "c");
    }

    #[tokio::test]
    async fn test_delete_nonexistent_id_is_a_noop() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "a", "1");

        app.delete_topic(999).unwrap();

        assert_eq!(app.topics.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_flow_requires_confirmation() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "a", "1");
        app.news.selected = 0;

        app.request_delete_selected();
        let id = match &app.pending_confirm {
            Some(ConfirmAction::DeleteTopic { id, .. }) => *id,
            None => panic!("expected a pending confirmation"),
        };

        // Declining changes nothing
        app.pending_confirm = None;
        assert_eq!(app.topics.len(), 1);

        // Confirming deletes
        app.delete_topic(id).unwrap();
        assert!(app.topics.is_empty());
    }

    #[tokio::test]
    async fn test_delete_clamps_selection() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "a", "1");
        add_topic(&mut app, "b", "2");
        app.news.selected = 1;

        app.delete_topic(app.topics[1].id).unwrap();
        assert_eq!(app.news.selected, 0);
    }

    // Edit

    #[tokio::test]
    async fn test_edit_changes_only_target_and_keeps_id() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "A", "one");
        add_topic(&mut app, "B", "two");
        let target = app.topics[0].id;
        let other = app.topics[1].clone();

        app.news.selected = 0;
        app.start_edit_selected();
        app.news.edit_title = "B-side".to_string();
        app.save_edit().unwrap();

        assert_eq!(app.topics[0].id, target);
        assert_eq!(app.topics[0].title, "B-side");
        assert_eq!(app.topics[0].content, "one");
        assert_eq!(app.topics[1], other);
        assert_eq!(app.news.editing_id, None);
    }

    #[tokio::test]
    async fn test_start_edit_replaces_single_slot() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "A", "one");
        add_topic(&mut app, "B", "two");

        app.news.selected = 0;
        app.start_edit_selected();
        assert_eq!(app.news.editing_id, Some(app.topics[0].id));

        app.news.selected = 1;
        app.start_edit_selected();
        assert_eq!(app.news.editing_id, Some(app.topics[1].id));
        assert_eq!(app.news.edit_title, "B");
    }

    #[tokio::test]
    async fn test_cancel_edit_discards_draft_without_persisting() {
        let (kv, mut app) = test_app();
        add_topic(&mut app, "A", "one");
        let before = kv.get(NEWS_KEY).unwrap();

        app.news.selected = 0;
        app.start_edit_selected();
        app.news.edit_title = "changed".to_string();
        app.cancel_edit();

        assert_eq!(app.topics[0].title, "A");
        assert_eq!(kv.get(NEWS_KEY).unwrap(), before);
        assert_eq!(app.news.editing_id, None);
    }

    // News screen mount

    #[tokio::test]
    async fn test_entering_news_reloads_store_and_resets_forms() {
        let (kv, mut app) = test_app();
        app.news.show_add_form = true;
        app.news.add_title = "stale".to_string();

        // Another writer updated the store behind our back
        kv.set(NEWS_KEY, r#"[{"id":7,"title":"x","content":"y"}]"#)
            .unwrap();

        app.navigate(Route::News);

        assert_eq!(app.route, Route::News);
        assert_eq!(app.topics.len(), 1);
        assert_eq!(app.topics[0].id, 7);
        // Fresh mount: transient state starts over
        assert!(!app.news.show_add_form);
        assert!(app.news.add_title.is_empty());
    }

    // Registration results

    #[tokio::test]
    async fn test_registration_success_sets_flag_and_navigates() {
        let (kv, mut app) = test_app();
        app.route = Route::Register;
        app.register.in_flight = true;

        app.apply_registration_result(Ok(()));

        assert_eq!(kv.get("isAuth").unwrap(), Some("true".to_string()));
        assert_eq!(app.route, Route::Profile);
        assert!(!app.register.in_flight);
    }

    #[tokio::test]
    async fn test_registration_conflict_shows_message_without_flag() {
        let (kv, mut app) = test_app();
        app.route = Route::Register;
        app.register.in_flight = true;

        app.apply_registration_result(Err(RegisterError::Conflict));

        assert_eq!(kv.get("isAuth").unwrap(), None);
        assert_eq!(
            app.register.error.as_deref(),
            Some("Пользователь с таким именем уже существует")
        );
        assert_eq!(app.route, Route::Register);
        assert!(!app.register.in_flight);
    }

    // Status expiry

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        let (_kv, mut app) = test_app();
        time::pause();
        app.set_status("Тест");

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    // Navigation in the list

    #[tokio::test]
    async fn test_nav_clamps_at_both_ends() {
        let (_kv, mut app) = test_app();
        add_topic(&mut app, "a", "1");
        add_topic(&mut app, "b", "2");

        app.nav_up();
        assert_eq!(app.news.selected, 0);

        app.nav_down();
        app.nav_down();
        app.nav_down();
        assert_eq!(app.news.selected, 1);
    }
}
