//! Per-request tracing.

use std::time::Duration;

use tracing::{Span, info, info_span, warn};

use crate::request::Request;
use crate::response::Response;

/// Requests taking longer than this are logged at `warn`.
const SLOW_REQUEST: Duration = Duration::from_secs(5);

/// Root span carried by every log line emitted while handling `req`.
pub(crate) fn request_span(req: &Request) -> Span {
    info_span!("request", method = %req.method(), path = %req.path())
}

/// Logs the outcome of a request inside its span.
pub(crate) fn on_response(res: &Response, elapsed: Duration) {
    let status = res.status_code().as_u16();
    let duration_ms = elapsed.as_millis();
    if elapsed > SLOW_REQUEST {
        warn!(status, duration_ms, "slow request");
    } else {
        info!(status, duration_ms, "request completed");
    }
}
