//! Application startup and initialization logic.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::auth::jwt::JwtService;
use crate::config::{Config, LogFormat};
use crate::database;
use crate::services::RegistrationService;

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "ppr_api=debug,tower_http=debug";

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    // A subscriber is already installed when tests initialise twice.
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Initialize the registration store and services and create the AppState.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    info!("Starting registry API in {} mode", config.environment);

    let jwt_service = JwtService::new(config)?;
    info!("✅ JWT service initialized (issuer: {})", jwt_service.issuer());

    let store = database::setup_store(config).await?;
    info!("✅ Registration store ready");

    let registration_service = RegistrationService::new(store);

    Ok(AppState {
        config: config.clone(),
        jwt_service,
        registration_service,
    })
}

/// Wait for SIGTERM or SIGINT signal for graceful shutdown
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
