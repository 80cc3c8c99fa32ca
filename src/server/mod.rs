//! Server module
//!
//! Listener binding, the accept loop, per-connection serving, and
//! interrupt-driven shutdown.

pub mod conn;
pub mod shutdown;

use crate::config::AppState;
use crate::logger;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Bind the listener. A plain bind with no address reuse options: if the
/// port is already taken the error surfaces immediately and the caller
/// exits without serving anything.
pub async fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// Accept connections until the shutdown signal fires. Accept errors are
/// logged and the loop keeps going; each accepted connection is served in
/// its own task.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        conn::spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                // Listener drops here; in-flight connections finish in
                // their own tasks.
                break;
            }
        }
    }
    Ok(())
}
