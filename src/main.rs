//! CORS-enabled static file server for local UI development.
//!
//! Serves the directory next to the executable (or a configured root) over
//! plain HTTP/1.1, attaching a wildcard CORS grant to every response so a
//! UI bundle can talk to a backend running on another port.

mod config;
mod handler;
mod http;
mod logger;
mod server;

use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg.logging)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let state = Arc::new(config::AppState::new(cfg)?);

    // Bind failures (port taken, bad address) are fatal: report and exit
    // non-zero without serving anything.
    let listener = match server::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_error(&format!("Failed to bind {addr}: {e}"));
            return Err(e.into());
        }
    };

    logger::log_server_start(&addr, &state.root, &state.config);

    let shutdown = server::shutdown::spawn_signal_listener();
    server::run(listener, state, shutdown).await?;

    logger::log_shutdown();
    Ok(())
}
