use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

mod cli;
mod handlers;
mod middleware;
mod routes;
mod state;

use cli::Cli;
use common::config::Settings;
use common::service::PeriodicTaskUseCase;
use common::telemetry;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let command line flags override it
    let mut config = Settings::load_from_path(&cli.config_dir)?;
    cli.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    telemetry::init_logging(&config.observability.log_level, config.observability.log_format)?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        max_points = config.schedule.max_points,
        "Configuration loaded"
    );

    let metrics_handle = if config.observability.metrics_enabled {
        Some(telemetry::init_metrics()?)
    } else {
        tracing::info!("Metrics disabled");
        None
    };

    let service = Arc::new(PeriodicTaskUseCase::new().with_max_points(config.schedule.max_points));
    let state = AppState::new(config.clone(), service, metrics_handle);

    let app = routes::create_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Initiating graceful shutdown");
}
