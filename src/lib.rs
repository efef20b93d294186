//! # repofolio
//!
//! A small JSON proxy in front of the GitHub REST API for a personal
//! portfolio site. It republishes one account's profile, its profile README
//! and the repositories the owner chose to showcase.
//!
//! ## Showcasing a repository
//!
//! A repository is listed by `/projects` when the first HTML comment in its
//! README holds JSON whose `visible` key is the string `"true"`:
//!
//! ```text
//! <!--{"visible":"true"}-->
//! ```
//!
//! A `favimage.png` at the repository root becomes its `coverImage`.
//!
//! ## What it does not do
//!
//! No caching, retries, rate-limit handling or upstream timeouts. Every
//! request goes to GitHub; a hung upstream call holds its request open.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::num::NonZeroUsize;
//! use repofolio::{AppState, GitHub, Server, api, middleware::cors::Cors};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), repofolio::Error> {
//!     let github = GitHub::new(repofolio::github::DEFAULT_API_URL, "octocat", None)?;
//!     let state = AppState::new(github, NonZeroUsize::new(16).unwrap());
//!     let app = api::router(state).cors(Cors::allow_origin("https://portfolio.example"));
//!
//!     Server::bind("0.0.0.0:3000".parse().unwrap()).serve(app).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod config;
pub mod enrich;
pub mod github;
pub mod hosting;
pub mod middleware;
pub mod model;

#[cfg(test)]
mod testing;

pub use api::AppState;
pub use config::Config;
pub use error::{Error, Result};
pub use github::GitHub;
pub use handler::Handler;
pub use hosting::Hosting;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
