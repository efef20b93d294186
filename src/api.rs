//! JSON endpoints consumed by the portfolio front-end.
//!
//! | Method | Path | Returns |
//! |---|---|---|
//! | GET | `/user` | account profile |
//! | GET | `/user/readme` | profile README, rendered |
//! | GET | `/projects` | showcased repositories with `coverImage` |
//! | GET | `/repos/{name}/readme` | a repository's README, rendered |
//!
//! Failures are logged with their cause and answered with a 500 carrying a
//! fixed `{"error": ...}` message. Clients never see upstream detail.

use std::num::NonZeroUsize;
use std::sync::Arc;

use http::StatusCode;
use tracing::error;

use crate::enrich;
use crate::hosting::Hosting;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// State shared by every handler.
pub struct AppState<H> {
    pub hosting: Arc<H>,
    /// Upper bound on repositories evaluated concurrently by `/projects`.
    pub lookup_limit: NonZeroUsize,
}

impl<H> AppState<H> {
    pub fn new(hosting: H, lookup_limit: NonZeroUsize) -> Self {
        Self { hosting: Arc::new(hosting), lookup_limit }
    }
}

/// All routes, bound to `state`.
pub fn router<H: Hosting>(state: AppState<H>) -> Router<AppState<H>> {
    Router::new(state)
        .get("/user", user::<H>)
        .get("/user/readme", user_readme::<H>)
        .get("/projects", projects::<H>)
        .get("/repos/{name}/readme", repo_readme::<H>)
}

fn internal_error(message: &str) -> Response {
    Response::error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

// GET /user
async fn user<H: Hosting>(_req: Request, state: Arc<AppState<H>>) -> Response {
    match state.hosting.user().await {
        Ok(user) => Response::json(&user),
        Err(e) => {
            error!("error fetching user data: {e}");
            internal_error("Failed to fetch user data")
        }
    }
}

// GET /user/readme — the profile README lives in the repository named after
// the account.
async fn user_readme<H: Hosting>(_req: Request, state: Arc<AppState<H>>) -> Response {
    let hosting = &state.hosting;
    match hosting.readme_html(hosting.account()).await {
        Ok(readme) => Response::json(&readme),
        Err(e) => {
            error!("error fetching user README: {e}");
            internal_error("Failed to fetch user README")
        }
    }
}

// GET /projects
async fn projects<H: Hosting>(_req: Request, state: Arc<AppState<H>>) -> Response {
    match enrich::projects(Arc::clone(&state.hosting), state.lookup_limit).await {
        Ok(repos) => Response::json(&repos),
        Err(e) => {
            error!("error fetching projects: {e}");
            internal_error("Failed to fetch projects")
        }
    }
}

// GET /repos/{name}/readme
async fn repo_readme<H: Hosting>(req: Request, state: Arc<AppState<H>>) -> Response {
    let Some(name) = req.param("name") else {
        return Response::error(StatusCode::NOT_FOUND, "Not Found");
    };
    match state.hosting.readme_html(name).await {
        Ok(readme) => Response::json(&readme),
        Err(e) => {
            error!(repo = name, "error fetching repository README: {e}");
            internal_error("Failed to fetch repository README")
        }
    }
}
