//! Shared HTTP serving plumbing.
//!
//! # Responsibilities
//! - Apply the common middleware stack (request ID, tracing, timeout,
//!   body limit) to every service router
//! - Serve a router with graceful shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Outer bound on one inbound request, middleware-enforced. Generous on
/// purpose: the interesting budgets live inside the handlers.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Inbound bodies are single small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Apply the common middleware stack.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
    )
}

/// Run a service router until the shutdown signal fires.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}
