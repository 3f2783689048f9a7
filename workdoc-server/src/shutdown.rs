//! Graceful shutdown handling.
//!
//! Provides shutdown coordination for the WorkDoc360 server, including
//! signal handling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::{error, info};

/// Shutdown controller for coordinating graceful shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownController {
    /// Whether shutdown has been initiated.
    shutdown_initiated: Arc<AtomicBool>,
    /// Sender for shutdown notification.
    shutdown_tx: broadcast::Sender<()>,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    /// Creates a new shutdown controller.
    #[must_use]
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    /// Initiates shutdown, notifying all listeners. Idempotent.
    pub fn initiate_shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Shutdown initiated");
            let _ = self.shutdown_tx.send(());
        }
    }

    /// Returns whether shutdown has been initiated.
    #[must_use]
    pub fn is_shutdown_initiated(&self) -> bool {
        self.shutdown_initiated.load(Ordering::SeqCst)
    }

    /// Completes when shutdown is initiated.
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.shutdown_tx.subscribe();
        if self.is_shutdown_initiated() {
            return;
        }
        let _ = rx.recv().await;
    }
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, then initiates shutdown.
pub async fn setup_signal_handlers(controller: ShutdownController) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => info!("Received SIGINT (Ctrl+C)"),
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to install signal handlers");
                return;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        info!("Received Ctrl+C");
    }

    controller.initiate_shutdown();
}
