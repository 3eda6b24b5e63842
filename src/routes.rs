//! Application routes and session gates.
//!
//! Gates read stored session state synchronously. They never contact the
//! backend, so an expired token still passes a gate; expiry is discovered
//! when the next guarded request comes back 401.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;

use crate::shell::Navigator;
use crate::state::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Users,
    Reviews,
    Diagnoses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Diagnosis,
    MyPage,
    Profile,
    Admin(AdminSection),
}

impl Route {
    /// Where a successful login lands.
    pub const LANDING: Self = Self::Diagnosis;

    pub const ALL: [Self; 9] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::Diagnosis,
        Self::MyPage,
        Self::Profile,
        Self::Admin(AdminSection::Users),
        Self::Admin(AdminSection::Reviews),
        Self::Admin(AdminSection::Diagnoses),
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Diagnosis => "/diagnosis",
            Self::MyPage => "/mypage",
            Self::Profile => "/profile",
            Self::Admin(AdminSection::Users) => "/admin/users",
            Self::Admin(AdminSection::Reviews) => "/admin/reviews",
            Self::Admin(AdminSection::Diagnoses) => "/admin/diagnoses",
        }
    }

    /// Resolve a location path. Query strings, fragments, and trailing slashes
    /// are ignored; `/admin` resolves to the users section.
    #[must_use]
    pub fn parse(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        if normalized == "/admin" {
            return Some(Self::Admin(AdminSection::Users));
        }
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    #[must_use]
    pub fn gate(self) -> Gate {
        match self {
            Self::Home | Self::Login | Self::Register => Gate::Public,
            Self::Diagnosis | Self::MyPage | Self::Profile => Gate::Authenticated,
            Self::Admin(_) => Gate::Staff,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Public,
    Authenticated,
    Staff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(Route),
}

impl Gate {
    #[must_use]
    pub fn check(self, session: &Session) -> Access {
        match self {
            Self::Public => Access::Render,
            Self::Authenticated if !session.is_logged_in() => Access::Redirect(Route::Login),
            Self::Authenticated => Access::Render,
            Self::Staff if !session.is_logged_in() => Access::Redirect(Route::Login),
            Self::Staff if !session.is_staff() => Access::Redirect(Route::Home),
            Self::Staff => Access::Render,
        }
    }
}

/// Evaluate `route`'s gate and perform the redirect, if any.
pub fn enter(route: Route, session: &Session, navigator: &dyn Navigator) -> Access {
    let access = route.gate().check(session);
    if let Access::Redirect(target) = access {
        tracing::debug!(from = %route, to = %target, "route gate redirect");
        navigator.navigate(target);
    }
    access
}
