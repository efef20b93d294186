//! Cross-origin policy for the portfolio front-end.
//!
//! Exactly one caller origin is allowed. The header value is always the
//! configured origin, never an echo of the request's `Origin`.

use http::{Method, StatusCode};

use crate::request::Request;
use crate::response::Response;

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "content-type";

/// Cross-origin policy. [`Cors::default`] adds no headers at all.
#[derive(Clone, Debug, Default)]
pub struct Cors {
    allowed_origin: Option<String>,
}

impl Cors {
    /// Allow requests from `origin` (e.g. `https://portfolio.example`).
    pub fn allow_origin(origin: impl Into<String>) -> Self {
        Self { allowed_origin: Some(origin.into()) }
    }

    pub fn is_enabled(&self) -> bool {
        self.allowed_origin.is_some()
    }

    /// Whether `req` is a preflight this policy answers itself.
    pub(crate) fn is_preflight(&self, req: &Request) -> bool {
        self.is_enabled() && *req.method() == Method::OPTIONS
    }

    /// `204 No Content` answer to a preflight request.
    pub(crate) fn preflight(&self) -> Response {
        self.apply(Response::status(StatusCode::NO_CONTENT))
            .with_header("access-control-allow-methods", ALLOWED_METHODS)
            .with_header("access-control-allow-headers", ALLOWED_HEADERS)
    }

    /// Decorates an outgoing response with the policy headers.
    pub(crate) fn apply(&self, res: Response) -> Response {
        match &self.allowed_origin {
            Some(origin) => res
                .with_header("access-control-allow-origin", origin)
                .with_header("vary", "origin"),
            None => res,
        }
    }
}
