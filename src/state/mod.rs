//! Client-side session state.
//!
//! DESIGN
//! ======
//! `store` is the raw key/value persistence seam (memory, file, browser
//! localStorage). `session` layers typed accessors and change notification on
//! top so the guard, route gates, and page controllers never touch raw keys.

pub mod session;
pub mod store;
