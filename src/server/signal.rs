// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) request a graceful shutdown. Platforms without
// Unix signals only get Ctrl+C.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn a task that notifies `shutdown` once a stop signal arrives
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        let received = wait_for_stop_signal().await;
        logger::log_info(&format!("{received} received, initiating graceful shutdown"));
        // notify_one stores a permit if the accept loop is not waiting yet
        shutdown.notify_one();
    });
}

#[cfg(unix)]
async fn wait_for_stop_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (Ok(mut sigterm), Ok(mut sigint)) = (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) else {
        logger::log_error("Failed to register SIGTERM/SIGINT handlers, falling back to Ctrl+C");
        return wait_for_ctrl_c().await;
    };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    }
}

#[cfg(not(unix))]
async fn wait_for_stop_signal() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}
