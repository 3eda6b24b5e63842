//! Front-end seams: navigation and transient notifications.
//!
//! Page controllers and the session guard talk to the host UI only through
//! these two traits, so the same controllers run under the CLI, a WASM
//! shell, or test recorders.

use crate::routes::Route;

/// A transient user-visible notification (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait Navigator: Send + Sync {
    /// Client-side route change. In-memory state survives.
    fn navigate(&self, route: Route);

    /// Full navigation to `route`. All in-memory state is discarded.
    fn hard_redirect(&self, route: Route);
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.location` / `window.history` navigator for WASM shells.
#[cfg(feature = "browser")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationNavigator;

#[cfg(feature = "browser")]
impl Navigator for LocationNavigator {
    fn navigate(&self, route: Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path())));
        if let Err(e) = pushed {
            tracing::error!(error = ?e, %route, "history push failed");
        }
    }

    fn hard_redirect(&self, route: Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(route.path()) {
            tracing::error!(error = ?e, %route, "location redirect failed");
        }
    }
}
