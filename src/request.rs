//! Incoming HTTP request type.

use std::collections::HashMap;

use http::Method;

/// An incoming HTTP request, reduced to what handlers need.
///
/// Every route this service exposes is a `GET`, so the body is never read.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), params: HashMap::new() }
    }

    pub(crate) fn from_hyper<B>(req: &hyper::Request<B>) -> Self {
        Self::new(req.method().clone(), req.uri().path())
    }

    #[cfg(test)]
    pub(crate) fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Returns a named path parameter.
    ///
    /// For a route `/repos/{name}/readme`, `req.param("name")` on
    /// `/repos/blog/readme` returns `Some("blog")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hyper_drops_query_string() {
        let raw = hyper::Request::builder()
            .method(Method::GET)
            .uri("/projects?page=2")
            .header("origin", "https://portfolio.example")
            .body(())
            .unwrap();

        let req = Request::from_hyper(&raw);
        assert_eq!(*req.method(), Method::GET);
        assert_eq!(req.path(), "/projects");
        assert_eq!(req.param("page"), None);
    }
}
