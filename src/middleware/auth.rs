//! Static bearer-token gate.
//!
//! The gate wraps a handler rather than living inside it, so the users
//! handler never sees credentials:
//!
//! ```rust,no_run
//! # use users_svc::{middleware, Request, Response, Router};
//! # async fn users(_: Request) -> Response { Response::text("") }
//! # fn build() -> Result<Router, users_svc::Error> {
//! Router::new().route("/users", middleware::bearer_auth("s3cret".into(), users))
//! # }
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Requires `Authorization: Bearer <token>` before `inner` runs.
///
/// A missing header answers `401 Unauthorized`; any other value answers
/// `401 Invalid token`.
pub fn bearer_auth(token: Arc<str>, inner: impl Handler) -> impl Handler {
    let inner = inner.into_boxed_handler();
    move |req: Request| {
        let verdict = check(&req, &token);
        let inner = Arc::clone(&inner);
        async move {
            match verdict {
                Ok(()) => inner.call(req).await,
                Err(res) => res,
            }
        }
    }
}

fn check(req: &Request, token: &str) -> Result<(), Response> {
    let Some(value) = req.header("authorization") else {
        warn!(path = req.path(), "request without credentials");
        return Err(Response::error(Status::Unauthorized, "Unauthorized"));
    };
    match value.strip_prefix("Bearer ") {
        Some(presented) if presented.trim() == token => Ok(()),
        _ => {
            warn!(path = req.path(), "request with invalid token");
            Err(Response::error(Status::Unauthorized, "Invalid token"))
        }
    }
}
