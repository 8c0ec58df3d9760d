//! mediashare server: a small multi-user file-sharing web application.
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use mediashare_api::{AppState, build_app};
use mediashare_auth::credential::CredentialStore;
use mediashare_core::config::AppConfig;
use mediashare_core::error::AppError;
use mediashare_storage::{FileGateway, LocalStorageProvider};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/`, the environment overlay and
/// `MEDIASHARE__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("MEDIASHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(false)
            .init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(false).init();
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting mediashare v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Upload directory ─────────────────────────────────
    tracing::info!("Preparing upload directory '{}'...", config.storage.upload_dir);
    let provider = LocalStorageProvider::new(&config.storage.upload_dir).await?;
    let files = Arc::new(FileGateway::new(Arc::new(provider)));

    // ── Step 2: Credential store ─────────────────────────────────
    tracing::info!("Opening credential store '{}'...", config.auth.users_file);
    let credentials = CredentialStore::open(
        &config.auth.users_file,
        &config.auth.admin_username,
        &config.auth.seed_admin_password,
    )
    .await?;
    let credentials = Arc::new(credentials);

    // ── Step 3: Session signing ──────────────────────────────────
    if config.session.uses_development_secret() {
        tracing::warn!(
            "Session secret is the development default; set MEDIASHARE__SESSION__SECRET in production"
        );
    }

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let app_state = AppState::new(config, credentials, files)?;
    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("mediashare listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("mediashare shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
