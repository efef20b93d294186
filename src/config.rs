//! Startup configuration.
//!
//! Every option can be given as a flag or through the environment; flags win.
//! A `.env` file, when present, fills in variables the environment lacks.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{Error, Result};
use crate::github::DEFAULT_API_URL;

/// Loads a `.env` file into the process environment.
///
/// `None` looks for `.env` in the working directory and its parents.
/// Variables already set are never overwritten. Returns the file that was
/// loaded, or `None` when there is no file.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(Error::Config(format!("cannot load .env: {e}"))),
    }
}

#[derive(Clone, Debug, Parser)]
#[command(name = "repofolio", version, about)]
pub struct Config {
    /// GitHub access token. Unauthenticated calls are heavily rate limited.
    #[arg(long, env = "GITHUB_KEY", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Account whose profile and repositories are published.
    #[arg(long, env = "GITHUB_ACCOUNT", default_value = "daniel-iliesh")]
    pub account: String,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The single origin allowed to call this service from a browser.
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Repositories evaluated concurrently when building `/projects`.
    #[arg(long, env = "MAX_CONCURRENT_LOOKUPS", default_value = "16")]
    pub max_concurrent_lookups: NonZeroUsize,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
