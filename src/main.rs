//! Inlive Server — accommodation marketplace backend.
//!
//! Main entry point that wires all crates together and starts the server.

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use inlive_core::config::AppConfig;
use inlive_core::error::AppError;
use inlive_database::repositories::SearchRequestRepository;
use inlive_service::ExpirationSweeper;

#[tokio::main]
async fn main() {
    let env = std::env::var("INLIVE_ENV").unwrap_or_else(|_| "local".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Inlive server v{}", env!("CARGO_PKG_VERSION"));

    let pool = inlive_database::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    inlive_database::migration::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // Shutdown channel shared by the HTTP server and background tasks.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Expire search requests whose offer window has lapsed.
    let sweeper = ExpirationSweeper::new(SearchRequestRepository::new(pool.clone()));
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown_rx));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = inlive_api::build_app(config, pool)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Inlive server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), sweeper_handle).await;

    tracing::info!("Inlive server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
