//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Tells every open connection to shut down gracefully. Idle keep-alive
//!    connections close at once; busy ones finish the request in flight and
//!    then close.
//! 3. Waits for every connection task and returns from [`Server::serve`],
//!    which lets `main` exit cleanly.
//!
//! In-flight requests include any `/projects` fan-out still waiting on the
//! hosting API. Upstream calls carry no timeout, so a hung call delays
//! shutdown until the process is killed.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::request::Request;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown.
    pub async fn serve<S: Send + Sync + 'static>(self, router: Router<S>) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but shuts down when `signal` resolves
    /// instead of on SIGTERM or Ctrl-C.
    pub async fn serve_with_shutdown<S, F>(self, router: Router<S>, signal: F) -> Result<(), Error>
    where
        S: Send + Sync + 'static,
        F: Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "repofolio listening");
        run(listener, router, signal).await;
        info!("repofolio stopped");
        Ok(())
    }
}

async fn run<S, F>(listener: TcpListener, router: Router<S>, signal: F)
where
    S: Send + Sync + 'static,
    F: Future<Output = ()>,
{
    let router = Arc::new(router);
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut tasks = tokio::task::JoinSet::new();

    tokio::pin!(signal);

    loop {
        tokio::select! {
            // Check shutdown first so a SIGTERM stops accepting at once,
            // even if more connections are queued.
            biased;

            () = &mut signal => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let router = Arc::clone(&router);
                let io = TokioIo::new(stream);
                let mut stop = stop_rx.clone();

                tasks.spawn(async move {
                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req, remote_addr).await }
                    });

                    let builder = ConnBuilder::new(TokioExecutor::new());
                    let conn = builder.serve_connection(io, svc);
                    tokio::pin!(conn);

                    let mut stopping = false;
                    let result = loop {
                        tokio::select! {
                            res = conn.as_mut() => break res,
                            _ = stop.changed(), if !stopping => {
                                stopping = true;
                                conn.as_mut().graceful_shutdown();
                            }
                        }
                    };
                    if let Err(e) = result {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished connection tasks so the set does not grow
            // without bound.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    drop(listener);
    stop_tx.send_replace(true);
    while tasks.join_next().await.is_some() {}
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response. Every failure is already a
/// response by the time it gets here, so hyper never sees an error.
async fn dispatch<S: Send + Sync + 'static>(
    router: Arc<Router<S>>,
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    debug!(peer = %remote_addr, method = %req.method(), path = req.uri().path(), "dispatch");
    let response = router.handle(Request::from_hyper(&req)).await;
    Ok(response.into_hyper())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C) the process receives.
/// On Windows only Ctrl-C is available.
///
/// A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
