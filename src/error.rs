//! Unified error type.

/// The error type returned by repofolio's fallible operations.
///
/// Request-level failures are never shown to clients as-is: handlers log the
/// `Error` and answer with a generic [`Response::error`](crate::Response::error).
/// The enrichment pipeline goes further and turns per-repository errors into
/// absent values, so only listing and profile calls ever surface one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Binding the listener or accepting a connection failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The hosting API could not be reached, or its body could not be read.
    #[error("upstream: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The hosting API answered with a non-success status.
    #[error("upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    /// README content was not valid base64.
    #[error("decode: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Invalid startup configuration.
    #[error("config: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
