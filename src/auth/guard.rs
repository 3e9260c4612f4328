//! Route guard: an explicit allow/deny decision, not a side effect.
//!
//! Navigation code asks for a decision and performs the redirect itself,
//! so the gate is testable without rendering anything. Denial is silent:
//! the caller swaps the target route, no error is shown.

use crate::auth::Session;
use crate::route::Route;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested route.
    Allow,
    /// Render the given route instead.
    Redirect(Route),
}

/// Decide whether `route` may be shown under the current session.
///
/// Only the profile route is guarded; everything else is public. The
/// topics screen is readable by anyone — its mutating affordances are
/// hidden at the view layer instead.
pub fn check_route(route: Route, session: &Session) -> GuardDecision {
    match route {
        Route::Profile if !session.is_authenticated() => GuardDecision::Redirect(Route::Login),
        _ => GuardDecision::Allow,
    }
}
