//! Middleware layer.
//!
//! Cross-cutting concerns that sit in front of handlers:
//!
//! - [`trace`] — per-request span with method, path, status, latency
//! - [`auth`] — static bearer-token gate composed around a handler

pub mod auth;
pub mod trace;

pub use auth::bearer_auth;
