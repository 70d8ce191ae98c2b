//! Request tracing.
//!
//! Every dispatched request runs inside a `request` span carrying the method
//! and path, with a `started` event on entry and a `completed` event
//! carrying the status and latency on exit.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `call` inside a request span and logs its outcome.
pub async fn traced<F>(method: &str, path: &str, call: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, %path);
    async move {
        let started = Instant::now();
        info!("started");
        let res = call.await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(status = res.status_code().as_u16(), elapsed_ms, "completed");
        res
    }
    .instrument(span)
    .await
}
