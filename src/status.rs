//! HTTP status codes emitted by the service, as a typed enum.
//!
//! ```rust
//! use users_svc::{Response, Status};
//!
//! Response::status(Status::NoContent);
//! Response::error(Status::NotFound, "User not found");
//! ```

/// Every status the users API and its probes can answer with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                            // 200
    Created,                       // 201
    NoContent,                     // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,                    // 400
    Unauthorized,                  // 401
    NotFound,                      // 404
    MethodNotAllowed,              // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,           // 500
    ServiceUnavailable,            // 503
}

impl Status {
    pub fn as_u16(self) -> u16 {
        self.into()
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::NoContent           => 204,
            Status::BadRequest          => 400,
            Status::Unauthorized        => 401,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
            Status::ServiceUnavailable  => 503,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        // Every variant above is a registered code.
        http::StatusCode::from_u16(s.into()).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}
