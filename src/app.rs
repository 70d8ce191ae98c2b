//! Route table for the service.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;
use crate::health;
use crate::middleware::bearer_auth;
use crate::router::Router;
use crate::users::{UserHandler, UserService};

/// Mounts `/users` (behind the bearer gate when `api_token` is set) and the
/// two health probes.
pub fn app(service: UserService, deadline: Duration, api_token: Option<&str>) -> Result<Router, Error> {
    let users = UserHandler::new(service.clone(), deadline).into_handler();

    let router = Router::new()
        .route("/healthz", health::liveness)?
        .route("/readyz", health::readiness(service))?;

    match api_token {
        Some(token) => router.route("/users", bearer_auth(Arc::from(token), users)),
        None => router.route("/users", users),
    }
}
