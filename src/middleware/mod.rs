//! Middleware layer.
//!
//! Cross-cutting concerns wrapped around every routed request by
//! [`Router::handle`](crate::Router::handle):
//! - [`cors`] — single-origin cross-origin policy and preflight answers
//! - [`trace`] — per-request span with method, path, status, latency

pub mod cors;
pub mod trace;
