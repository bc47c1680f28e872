//! Graceful shutdown on SIGTERM/SIGINT.
//!
//! [`Shutdown`] owns a watch channel flipped by the signal listener;
//! [`ShutdownSignal`] is the future handed to
//! `axum::serve(..).with_graceful_shutdown`.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info};

/// Shutdown coordinator for the server.
#[derive(Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Spawns the task that waits for SIGTERM or SIGINT.
    #[cfg(unix)]
    pub fn spawn_listener(&self) {
        let shutdown = self.clone();

        tokio::spawn(async move {
            use tokio::signal::unix::{SignalKind, signal};

            let (mut sigterm, mut sigint) =
                match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                    (Ok(term), Ok(int)) => (term, int),
                    (Err(e), _) | (_, Err(e)) => {
                        error!(error = %e, "failed to install signal handlers");
                        return;
                    }
                };

            tokio::select! {
                _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                _ = sigint.recv() => info!("received SIGINT, shutting down"),
            }
            shutdown.trigger();
            debug!("signal listener stopped");
        });
    }

    /// Spawns the task that waits for Ctrl+C.
    #[cfg(not(unix))]
    pub fn spawn_listener(&self) {
        let shutdown = self.clone();

        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("received Ctrl+C, shutting down");
                shutdown.trigger();
            }
        });
    }

    /// Returns a future that completes once shutdown is signaled.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.rx.clone(),
        }
    }

    /// Flips the channel; every pending and future [`ShutdownSignal`]
    /// completes.
    fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

/// Completes when shutdown is signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub async fn wait(mut self) {
        // An error means every sender is gone; nothing can trigger any more.
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trigger_from_a_clone_is_shared() {
        let shutdown = Shutdown::new();
        shutdown.clone().trigger();
        assert!(*shutdown.rx.borrow());
    }

    #[tokio::test]
    async fn signal_completes_after_trigger() {
        let shutdown = Shutdown::new();
        let signal = shutdown.signal();

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.trigger();
        });

        let result = tokio::time::timeout(Duration::from_millis(500), signal.wait()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn signal_taken_after_trigger_completes_immediately() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_millis(50), shutdown.signal().wait()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn untriggered_signal_stays_pending() {
        let shutdown = Shutdown::new();
        let result = tokio::time::timeout(Duration::from_millis(20), shutdown.signal().wait()).await;
        assert!(result.is_err());
    }
}
