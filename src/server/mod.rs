//! HTTP boundary of the mock API.
//!
//! Adapts JSON requests into fixture, session and time-series calls and maps
//! every failure onto a single status code.

pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;

pub use response::FAILURE_STATUS;
pub use routes::{router, RouteInfo, ROUTES};
pub use state::{AppState, SharedState};

use log::{info, warn};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Serve the API on an already bound listener until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind `addr` and serve until Ctrl-C
pub async fn run_server(addr: SocketAddr, state: SharedState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("Mock dashboard API listening on http://{}", listener.local_addr()?);

    serve(listener, state, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
