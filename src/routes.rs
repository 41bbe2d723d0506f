//! Implicit route table and the unauthenticated redirect guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page components share one guard so every protected route redirects to
//! `/login` the same way. Unknown paths fall back to the home page.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::types::User;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Subscription,
}

impl Route {
    pub const ALL: [Self; 4] = [Self::Home, Self::Login, Self::Register, Self::Subscription];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Subscription => "/subscription",
        }
    }

    /// Match a location path, ignoring a query string and trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Plan changes are tied to an account.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Subscription)
    }

    /// The header's upgrade button toggles between the plans page and home.
    #[must_use]
    pub fn upgrade_target(self) -> Self {
        if self == Self::Subscription { Self::Home } else { Self::Subscription }
    }
}

/// Where to send a visitor to `route`: `Some(Route::Login)` when the route
/// needs a session and there is none.
#[must_use]
pub fn should_redirect_unauth(route: Route, session: Option<&User>) -> Option<Route> {
    (route.requires_auth() && session.is_none()).then_some(Route::Login)
}
