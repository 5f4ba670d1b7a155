//! Server startup: bind, serve, and shut down on Ctrl+C.

use tokio::net::TcpListener;
use tracing::{error, info};

use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Serve the API on the configured address until Ctrl+C.
pub async fn serve(state: AppState) -> AppResult<()> {
    let addr = state.config.server.bind_address();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}: {e}"), e)
    })?;

    info!(address = %addr, "Hungr server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Server error: {e}"), e))?;

    info!("Hungr server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
