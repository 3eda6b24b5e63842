//! Networking: transport seam, session guard, and typed endpoint wrappers.
//!
//! DESIGN
//! ======
//! Every backend call flows `Api` -> `SessionGuard` -> `Transport`. The guard
//! is the only place credentials are attached and the only place an
//! authentication failure is acted upon.

pub mod api;
pub mod error;
pub mod guard;
pub mod token;
pub mod transport;
pub mod types;
