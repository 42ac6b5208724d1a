//! `stockage-auth` — the report access gate.
//!
//! A single shared secret guards every report. This crate is intentionally
//! decoupled from HTTP and storage: the API layer feeds it password attempts
//! and session tokens, nothing else. Fail-closed: no partial report data is
//! ever computed for an unverified caller.

pub mod secret;
pub mod session;

pub use secret::{AccessError, SharedSecret};
pub use session::{SessionStore, SessionToken};
