use std::sync::Arc;

use seo_dashboard::config::{AppState, Config, EnvOverrides};
use seo_dashboard::{logger, server, Error};
use tokio::sync::Notify;

fn main() -> Result<(), Error> {
    // Optional first argument: config file path without extension
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path, &EnvOverrides::from_env())?,
        None => Config::load()?,
    };
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&n| n > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Error> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(AppState::new(&cfg));

    if cfg.uses_default_secret() && !cfg.app.debug {
        logger::log_warning("SECRET_KEY is not set, using the development default");
    }
    logger::log_server_start(&addr, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));
    server::serve(listener, state, shutdown).await;

    logger::log_info("Server stopped");
    Ok(())
}
