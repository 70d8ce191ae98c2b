//! Radix-tree request router.
//!
//! One tree keyed by path. Method dispatch belongs to the handler mounted on
//! the path, so a resource can answer `405` for verbs it does not support
//! instead of the router answering `404`.

use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
///
/// ```rust,no_run
/// # use users_svc::{health, Router};
/// # fn build() -> Result<Router, users_svc::Error> {
/// let app = Router::new()
///     .route("/healthz", health::liveness)?;
/// # Ok(app) }
/// ```
pub struct Router {
    routes: MatchitRouter<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: MatchitRouter::new() }
    }

    /// Mounts `handler` on `path`. Returns `self` for chaining.
    pub fn route(mut self, path: &str, handler: impl Handler) -> Result<Self, Error> {
        self.routes
            .insert(path, handler.into_boxed_handler())
            .map_err(|source| Error::Route { path: path.to_owned(), source })?;
        Ok(self)
    }

    /// Routes one request and produces one response. Unknown paths get `404`.
    pub async fn dispatch(&self, req: Request) -> Response {
        let handler = match self.routes.at(req.path()) {
            Ok(matched) => Arc::clone(matched.value),
            Err(_) => return Response::error(Status::NotFound, "Not found"),
        };
        handler.call(req).await
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
