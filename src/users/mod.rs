//! The user resource: model, persistence accessor, service, and HTTP handler.

mod handler;
mod service;
mod store;

pub use handler::UserHandler;
pub use service::UserService;
pub use store::UserStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The sole entity. `id` is chosen by the client and never changes after
/// creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Outcome classification for store calls. The service passes these
/// through unchanged; the handler maps them to status codes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The insert collided with an existing primary key.
    #[error("user {id} already exists")]
    ConstraintViolation { id: i64 },

    /// No row matched, or zero rows were affected.
    #[error("no user found with id {id}")]
    NotFound { id: i64 },

    /// Driver, connectivity, or deadline failure.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}
