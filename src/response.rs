//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Success payloads are serialised as JSON directly; failures use the
//! `{"error": "<message>"}` envelope built by [`Response::error`].

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::status::Status;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use users_svc::{Response, Status};
///
/// Response::to_json(Status::Created, &serde_json::json!({"id": 1}));
/// Response::text("ok");
/// Response::status(Status::NoContent);
/// Response::error(Status::BadRequest, "Missing id");
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Response {
    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type(Status::Ok, TEXT, body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// Serialises `value` as the JSON body. A serialisation failure is
    /// logged and answered with a bare `500`.
    pub fn to_json<T: Serialize>(code: Status, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => Self::with_content_type(code, JSON, bytes),
            Err(e) => {
                error!("response serialisation failed: {e}");
                Self::status(Status::InternalServerError)
            }
        }
    }

    /// The `{"error": message}` envelope.
    pub fn error(code: Status, message: &str) -> Self {
        Self::to_json(code, &ErrorBody { error: message })
    }

    pub fn status_code(&self) -> Status { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn with_content_type(code: Status, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: code,
        }
    }

    /// Converts into the hyper response written to the connection.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(http::StatusCode::from(self.status));
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(Bytes::from(self.body))).unwrap_or_else(|e| {
            error!("invalid response header: {e}");
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Anything a handler returns must implement this.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler: `return Status::NoContent`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_shape() {
        let res = Response::error(Status::BadRequest, "Missing id");
        assert_eq!(res.status_code(), Status::BadRequest);
        assert_eq!(res.body(), br#"{"error":"Missing id"}"#);
        assert_eq!(res.header("Content-Type"), Some(JSON));
    }

    #[test]
    fn status_only_response_has_no_body_or_content_type() {
        let res = Status::NoContent.into_response();
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), None);
    }

    #[test]
    fn into_inner_carries_status_and_headers() {
        let inner = Response::text("ok").into_inner();
        assert_eq!(inner.status(), http::StatusCode::OK);
        assert_eq!(inner.headers()["content-type"], TEXT);
    }
}
