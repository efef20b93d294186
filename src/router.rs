//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler; [`Router::handle`] wraps the call in the middleware stack.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;
use tracing::Instrument;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{cors::Cors, trace};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup with the shared state handlers receive; pass it
/// to [`Server::serve`](crate::Server::serve). Registrations chain.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: Arc<S>,
    cors: Cors,
}

enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed,
    NotFound,
}

impl<S: Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state: Arc::new(state), cors: Cors::default() }
    }

    /// Sets the cross-origin policy applied to every response.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = cors;
        self
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::GET, ..)`.
    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Routes one request through the middleware stack and its handler.
    pub async fn handle(&self, req: Request) -> Response {
        let span = trace::request_span(&req);
        async move {
            let started = Instant::now();
            let res = self.route(req).await;
            trace::on_response(&res, started.elapsed());
            res
        }
        .instrument(span)
        .await
    }

    async fn route(&self, mut req: Request) -> Response {
        if self.cors.is_preflight(&req) {
            return self.cors.preflight();
        }

        let res = match self.lookup(&req.method, &req.path) {
            Lookup::Found(handler, params) => {
                req.params = params;
                handler.call(req, Arc::clone(&self.state)).await
            }
            Lookup::MethodNotAllowed => {
                Response::error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            }
            Lookup::NotFound => Response::error(StatusCode::NOT_FOUND, "Not Found"),
        };
        self.cors.apply(res)
    }

    fn lookup(&self, method: &Method, path: &str) -> Lookup<S> {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(Arc::clone(matched.value), params);
        }

        let other_method_matches = self.routes.iter()
            .any(|(m, tree)| m != method && tree.at(path).is_ok());
        if other_method_matches { Lookup::MethodNotAllowed } else { Lookup::NotFound }
    }
}
