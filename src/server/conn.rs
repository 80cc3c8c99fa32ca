//! Connection serving
//!
//! Wraps an accepted TCP stream for hyper and serves HTTP/1.1 requests on
//! it until the peer goes away. Keep-alive is on, so one connection can
//! carry many requests; a request that fails only produces an error
//! response, never a dead connection.

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

/// Serve one accepted connection in a spawned task.
pub fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            handler::handle_request(req, state, peer_addr)
        });

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        if let Err(err) = builder.serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}
