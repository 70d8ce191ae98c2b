//! Incoming HTTP request type.

use bytes::Bytes;
use percent_encoding::percent_decode_str;

use crate::method::Method;

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        query: Option<String>,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self { method, path, query, headers, body }
    }

    /// Splits the parts of a hyper request and pairs them with an already
    /// collected body.
    pub(crate) fn from_parts(parts: &http::request::Parts, body: Bytes) -> Self {
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        Self::new(
            Method::from(&parts.method),
            parts.uri.path().to_owned(),
            parts.uri.query().map(str::to_owned),
            headers,
            body,
        )
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first value of a query-string parameter, percent-decoded.
    ///
    /// On `/users?id=42&id=7`, `req.query("id")` returns `Some("42")`.
    /// A key with no `=` yields an empty value.
    pub fn query(&self, key: &str) -> Option<String> {
        self.query.as_deref()?
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(k, _)| decode_component(k) == key)
            .map(|(_, v)| decode_component(v))
    }
}

/// `application/x-www-form-urlencoded` decoding: `+` is a space, then
/// percent escapes. Invalid UTF-8 is replaced rather than rejected.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
