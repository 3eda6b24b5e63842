#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use tokio::sync::watch;

use crate::net::api::Api;
use crate::routes::{AdminSection, Route};
use crate::state::session::SessionSnapshot;
use crate::state::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Link(Route),
    Logout,
}

/// Items shown for `snapshot`, left to right.
#[must_use]
pub fn nav_items(snapshot: SessionSnapshot) -> Vec<NavItem> {
    let mut items = vec![NavItem::Link(Route::Home)];
    if snapshot.logged_in && snapshot.is_staff {
        items.push(NavItem::Link(Route::Admin(AdminSection::Users)));
    }
    if snapshot.logged_in {
        items.extend([Route::Diagnosis, Route::MyPage, Route::Profile].map(NavItem::Link));
        items.push(NavItem::Logout);
    } else {
        items.extend([Route::Login, Route::Register].map(NavItem::Link));
    }
    items
}

pub struct NavBar {
    api: Api,
}

impl NavBar {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn items(&self) -> Vec<NavItem> {
        nav_items(self.api.session().snapshot())
    }

    /// Re-render trigger: fires whenever login state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.api.session().subscribe()
    }

    /// Clear all stored credentials and go to the login page. Safe to call
    /// when already logged out.
    ///
    /// # Errors
    ///
    /// The first storage failure; navigation happens regardless.
    pub fn logout(&self) -> Result<(), StoreError> {
        let cleared = self.api.session().sign_out();
        if let Err(e) = &cleared {
            tracing::error!(error = %e, "logout could not clear storage");
        }
        self.api.guard().navigator().navigate(Route::Login);
        cleared
    }
}
