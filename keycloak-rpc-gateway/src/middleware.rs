use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::error::RpcStatus;

/// Logs each inbound RPC and, when it fails, its status.
pub async fn log_rpc(request: Request, next: Next) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let method = request.uri().path().trim_start_matches('/').to_string();
    let started = Instant::now();
    info!(method = %method, "incoming rpc request");

    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match response.extensions().get::<RpcStatus>() {
        Some(status) => error!(
            method = %method,
            code = %status.code,
            error = %status.message,
            elapsed_ms,
            "method failed"
        ),
        None => debug!(method = %method, elapsed_ms, "method completed"),
    }

    response
}
