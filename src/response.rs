//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it. Everything this service sends
//! is JSON, so the shortcuts here are JSON-first.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use http::StatusCode;
/// use repofolio::Response;
///
/// Response::json(&serde_json::json!({ "login": "octocat" }));
/// Response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user data");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` with `value` serialised as `application/json`.
    ///
    /// Serialisation failure is logged and becomes a 500 error body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::bytes_raw(StatusCode::OK, "application/json", body),
            Err(e) => {
                error!("failed to serialise response: {e}");
                Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string().into_bytes();
        Self::bytes_raw(status, "application/json", body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive lookup of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn bytes_raw(status: StatusCode, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status,
        }
    }

    /// Converts into the hyper response written on the wire.
    ///
    /// Headers that fail validation are dropped with an error log rather than
    /// failing the whole response.
    pub(crate) fn into_hyper(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        let headers = res.headers_mut();
        for (name, value) in self.headers {
            match (
                http::HeaderName::from_bytes(name.as_bytes()),
                http::HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => error!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_is_json_object() {
        let res = Response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch projects");
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.header("Content-Type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Failed to fetch projects" }));
    }

    #[test]
    fn into_hyper_keeps_status_and_headers() {
        let res = Response::json(&serde_json::json!([1, 2]))
            .with_header("vary", "origin")
            .into_hyper();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/json");
        assert_eq!(res.headers()["vary"], "origin");
    }

    #[test]
    fn into_hyper_drops_invalid_header() {
        let res = Response::status(StatusCode::NO_CONTENT)
            .with_header("bad header", "x")
            .into_hyper();

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(res.headers().is_empty());
    }
}
