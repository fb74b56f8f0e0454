use std::process::ExitCode;
use std::sync::Arc;

use index_server::config::{self, AppState, Config};
use index_server::error::ServerError;
use index_server::{logger, server};
use tokio::sync::Notify;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    // Optional first argument: config file path without extension
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    logger::init(&cfg.logging).map_err(ServerError::Logger)?;

    // Worker threads from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    logger::log_runtime_workers(cfg.server.workers);

    let runtime = runtime_builder.build().map_err(ServerError::Runtime)?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let addr = cfg.get_socket_addr()?;
    let index_path = cfg.resolve_index_path()?;

    let listener =
        server::create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;
    let bound = listener.local_addr().unwrap_or(addr);

    let state = Arc::new(AppState::new(cfg, index_path));
    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    logger::log_server_start(&config::display_url(&bound));

    server::start_server_loop(listener, state, shutdown).await;
    Ok(())
}
