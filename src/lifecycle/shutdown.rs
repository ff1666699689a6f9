//! Signal handling for graceful shutdown
//!
//! A daemon embedding waits on this before tearing the shell down (capture
//! bounds, drop the hotkey, close the socket). Shutdown can also be
//! requested programmatically, e.g. from a front-end quit action.

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::debug;

/// Waits for SIGTERM/SIGINT or a programmatic shutdown request.
pub struct ShutdownSignal {
    request_tx: watch::Sender<bool>,
}

/// Cloneable handle that can request shutdown from anywhere.
#[derive(Clone)]
pub struct ShutdownHandle {
    request_tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request shutdown; idempotent, never lost even before `wait` runs.
    pub fn request(&self) {
        let _ = self.request_tx.send(true);
    }
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler.
    pub fn new() -> Self {
        let (request_tx, _) = watch::channel(false);
        Self { request_tx }
    }

    /// Handle for requesting shutdown programmatically.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            request_tx: self.request_tx.clone(),
        }
    }

    /// Wait for a shutdown signal.
    pub async fn wait(&self) {
        let mut requested = self.request_tx.subscribe();

        #[cfg(unix)]
        {
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");

            tokio::select! {
                _ = sigterm.recv() => {
                    debug!("received SIGTERM");
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!("received interrupt");
                }
                _ = requested.wait_for(|requested| *requested) => {
                    debug!("shutdown requested");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    debug!("received interrupt");
                }
                _ = requested.wait_for(|requested| *requested) => {
                    debug!("shutdown requested");
                }
            }
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
