//! # skinlab
//!
//! Client for the AI Skin Lab diagnosis service. Owns the session lifecycle
//! (token storage, credential attachment, expiry handling, route gating) and
//! exposes one controller per application page on top of the REST backend.
//!
//! Front ends (the `cli` crate, or a WASM shell built with the `browser`
//! feature) supply a [`shell::Navigator`] and a [`shell::Notifier`] and drive
//! the controllers in [`pages`].

pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod shell;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::ClientConfig;
pub use net::api::Api;
pub use net::error::ApiError;
pub use net::guard::SessionGuard;
pub use state::session::{Session, SessionSnapshot};
