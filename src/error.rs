//! Unified infrastructure error type.

use thiserror::Error;

/// The error type returned by the service's fallible bootstrap operations.
///
/// Request-level failures (400, 404, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: binding a port, reaching the store at startup,
/// or registering a malformed route.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store: {0}")]
    Store(#[from] sqlx::Error),

    #[error("invalid route `{path}`: {source}")]
    Route {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
}
