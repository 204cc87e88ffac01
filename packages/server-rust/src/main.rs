//! `arith-server` binary: parse flags, install log sinks, serve until Ctrl-C.

use arith_server::cli::Cli;
use arith_server::{init_logging, NetworkModule, SERVICE_NAME};
use clap::Parser;
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config();
    let _log_guard = init_logging(&config.logging)?;

    let span = info_span!("service", service = SERVICE_NAME);
    async move {
        info!(
            host = %config.network.host,
            port = config.network.port,
            log_dir = ?config.logging.directory,
            "Server configuration loaded"
        );

        let mut module = NetworkModule::new(config.network);
        module.start().await?;
        module.serve(shutdown_signal()).await
    }
    .instrument(span)
    .await
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
