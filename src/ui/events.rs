//! Application event handling.
//!
//! Background tasks report through the `AppEvent` channel; the only task
//! in this client is the registration request.

use crate::app::{App, AppEvent};

pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::RegistrationCompleted { result } => app.apply_registration_result(result),
    }
}
