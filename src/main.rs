//! Entry point: load `.env`, install logging, read configuration, serve.

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use repofolio::middleware::cors::Cors;
use repofolio::{AppState, Config, GitHub, Server, api, config};

#[tokio::main]
async fn main() -> Result<(), repofolio::Error> {
    // Before the subscriber, so `.env` can set RUST_LOG.
    let env_file = config::load_env_file(None);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match env_file {
        Ok(Some(path)) => debug!(path = %path.display(), "loaded .env"),
        Ok(None) => debug!("no .env file found"),
        Err(e) => warn!("{e}"),
    }

    let config = Config::parse();
    if config.github_token.is_none() {
        info!("no GitHub token configured, using unauthenticated requests");
    }

    let github = GitHub::new(&config.api_url, config.account.clone(), config.github_token.clone())?;
    let state = AppState::new(github, config.max_concurrent_lookups);

    let cors = match &config.allowed_origin {
        Some(origin) => Cors::allow_origin(origin),
        None => Cors::default(),
    };
    let app = api::router(state).cors(cors);

    info!(account = %config.account, "serving GitHub account");
    Server::bind(config.socket_addr()).serve(app).await
}
