//! Shutdown signal handling
//!
//! SIGINT and SIGTERM both trigger a graceful stop: the accept loop is
//! notified, the listener closes, and the process exits with status 0.

use std::sync::Arc;
use tokio::sync::Notify;

/// Spawn the signal listener and return the notifier the accept loop
/// waits on.
#[cfg(unix)]
pub fn spawn_signal_listener() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let notify = Arc::new(Notify::new());
    let shutdown = Arc::clone(&notify);

    tokio::spawn(async move {
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
        shutdown.notify_one();
    });

    notify
}

/// Off Unix only Ctrl+C is available.
#[cfg(not(unix))]
pub fn spawn_signal_listener() -> Arc<Notify> {
    let notify = Arc::new(Notify::new());
    let shutdown = Arc::clone(&notify);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.notify_one();
        }
    });

    notify
}
