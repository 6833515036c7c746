//! Signal handling for graceful shutdown.
//!
//! SIGTERM and SIGINT (Ctrl+C) stop accepting connections and let in-flight
//! requests finish.

use tracing::{info, warn};

/// Completes when the process is asked to stop.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, initiating shutdown"),
                    _ = sigint.recv() => info!("Received SIGINT, initiating shutdown"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to install signal handlers: {}", e);
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating shutdown"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
