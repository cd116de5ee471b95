//! Route guard
//!
//! Runs before every screen. HR screens are not an error page for
//! employee-level users; the guard sends them to their own home
//! instead.

use heron_client::HomeRoute;

use crate::app::AppState;

/// Access level a screen requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in user
    SignedIn,
    /// HR-level roles only
    Hr,
}

/// Guard outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Session still resolving, render a loading state
    Loading,
    /// No session, show the login prompt
    LoginPrompt,
    /// Send the user to this home instead
    Redirect(HomeRoute),
    /// Allowed through
    Allow,
}

/// Resolve whether the current state may enter a screen
pub fn resolve(state: &AppState, access: Access) -> Gate {
    match state {
        AppState::Starting => Gate::Loading,
        AppState::LoggedOut => Gate::LoginPrompt,
        AppState::Active { home, .. } => match access {
            Access::SignedIn => Gate::Allow,
            Access::Hr if *home == HomeRoute::Hr => Gate::Allow,
            Access::Hr => Gate::Redirect(HomeRoute::Employee),
        },
    }
}
