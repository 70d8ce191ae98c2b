//! HTTP handler for `/users`: method dispatch, JSON in and out, query-string
//! ids, the per-call deadline, and outcome → status mapping.
//!
//! | Method | Success | Not found | Store failure |
//! |---|---|---|---|
//! | `POST` | 201 + user | — | 500 |
//! | `GET` | 200 + user | 404 | 500 |
//! | `PUT` | 200 + user | 400 | 500 |
//! | `DELETE` | 204 | 500 | 500 |
//!
//! Only `GET` answers a missing user with `404`. `PUT` answers `400 Invalid
//! input` and `DELETE` answers `500`; existing clients depend on both.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use super::{StoreError, User, UserService};
use crate::handler::Handler;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

const INVALID_INPUT: &str = "Invalid input";
const NOT_FOUND: &str = "User not found";

/// `PUT` body. Any `id` field is ignored; the query id wins.
#[derive(Deserialize)]
struct NameChange {
    name: String,
}

/// Stateless after construction; one instance serves every request.
pub struct UserHandler {
    service: UserService,
    deadline: Duration,
}

impl UserHandler {
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

    pub fn new(service: UserService, deadline: Duration) -> Self {
        Self { service, deadline }
    }

    /// Shares the handler behind an `Arc` so it can be mounted on a route.
    pub fn into_handler(self) -> impl Handler {
        let this = Arc::new(self);
        move |req: Request| {
            let this = Arc::clone(&this);
            async move { this.handle(req).await }
        }
    }

    pub async fn handle(&self, req: Request) -> Response {
        match req.method() {
            Method::Post => self.create(&req).await,
            Method::Get => self.get(&req).await,
            Method::Put => self.update(&req).await,
            Method::Delete => self.delete(&req).await,
            _ => Response::error(Status::MethodNotAllowed, "Method not allowed"),
        }
    }

    async fn create(&self, req: &Request) -> Response {
        let user: User = match decode(req.body()) {
            Ok(user) => user,
            Err(res) => return res,
        };

        match self.within(self.service.create_user(&user)).await {
            Ok(()) => {
                info!(id = user.id, "user created");
                Response::to_json(Status::Created, &user)
            }
            Err(e) => {
                error!(id = user.id, error = %e, "creating user failed");
                Response::error(Status::InternalServerError, "Failed to create user")
            }
        }
    }

    async fn get(&self, req: &Request) -> Response {
        let id = match query_id(req) {
            Ok(id) => id,
            Err(res) => return res,
        };

        match self.within(self.service.get_user(id)).await {
            Ok(user) => Response::to_json(Status::Ok, &user),
            Err(StoreError::NotFound { .. }) => Response::error(Status::NotFound, NOT_FOUND),
            Err(e) => {
                error!(id, error = %e, "retrieving user failed");
                Response::error(Status::InternalServerError, "Failed to retrieve user")
            }
        }
    }

    async fn update(&self, req: &Request) -> Response {
        let id = match query_id(req) {
            Ok(id) => id,
            Err(res) => return res,
        };
        let change: NameChange = match decode(req.body()) {
            Ok(change) => change,
            Err(res) => return res,
        };
        let user = User { id, name: change.name };

        match self.within(self.service.update_user(&user)).await {
            Ok(()) => {
                info!(id, "user updated");
                Response::to_json(Status::Ok, &user)
            }
            Err(StoreError::NotFound { .. }) => {
                warn!(id, "update of unknown user");
                Response::error(Status::BadRequest, INVALID_INPUT)
            }
            Err(e) => {
                error!(id, error = %e, "updating user failed");
                Response::error(Status::InternalServerError, "Failed to update user")
            }
        }
    }

    async fn delete(&self, req: &Request) -> Response {
        let id = match query_id(req) {
            Ok(id) => id,
            Err(res) => return res,
        };

        match self.within(self.service.delete_user(id)).await {
            Ok(()) => {
                info!(id, "user deleted");
                Response::status(Status::NoContent)
            }
            Err(e) => {
                error!(id, error = %e, "deleting user failed");
                Response::error(Status::InternalServerError, "Failed to delete user")
            }
        }
    }

    /// Bounds a service call by the deadline. On expiry the store future is
    /// dropped and the call reports `StoreUnavailable`.
    async fn within<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        let deadline = self.deadline;
        tokio::time::timeout(deadline, call).await.unwrap_or_else(|_| {
            Err(StoreError::StoreUnavailable(format!("store call exceeded {deadline:?}")))
        })
    }
}

fn query_id(req: &Request) -> Result<i64, Response> {
    let raw = req.query("id").ok_or_else(|| Response::error(Status::BadRequest, "Missing id"))?;
    raw.parse().map_err(|_| Response::error(Status::BadRequest, "Invalid id format"))
}

/// Decodes a JSON body, rejecting empty names along with malformed input.
fn decode<T: DeserializeOwned + Named>(body: &[u8]) -> Result<T, Response> {
    let value: T = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "undecodable user body");
        Response::error(Status::BadRequest, INVALID_INPUT)
    })?;
    if value.name().is_empty() {
        warn!("user body with empty name");
        return Err(Response::error(Status::BadRequest, INVALID_INPUT));
    }
    Ok(value)
}

/// Bodies that carry a user name.
trait Named {
    fn name(&self) -> &str;
}

impl Named for User {
    fn name(&self) -> &str { &self.name }
}

impl Named for NameChange {
    fn name(&self) -> &str { &self.name }
}
