//! Slotbook service
//!
//! REST API for slot availability and booking. Reads configuration from a
//! TOML file (`$SLOTBOOK_CONFIG` or `~/.config/slotbook/config.toml`).

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use slotbook::application::BookingService;
use slotbook::config::{AppConfig, LogFormat, LoggingConfig};
use slotbook::domain::RepositoryProvider;
use slotbook::infrastructure::ShutdownCoordinator;
use slotbook::interfaces::http::modules::health::HealthState;
use slotbook::interfaces::http::modules::metrics::MetricsState;
use slotbook::interfaces::http::AppState;
use slotbook::shared::errors::{AppError, InfraError};
use slotbook::{create_api_router, init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // ── Configuration ──────────────────────────────────────────
    let (app_cfg, config_path) = match AppConfig::load_default() {
        Ok(loaded) => {
            init_tracing(&loaded.0.logging);
            info!("Configuration loaded from {}", loaded.1.display());
            loaded
        }
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!("Failed to load config: {}", e);
            return Err(InfraError::from(e).into());
        }
    };

    info!("Starting Slotbook service...");

    // ── Prometheus recorder (before any metrics are emitted) ───
    let metrics_state = if app_cfg.metrics.enabled {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(MetricsState { handle })
            }
            Err(e) => {
                warn!("Metrics disabled, recorder could not be installed: {}", e);
                None
            }
        }
    } else {
        None
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::new(app_cfg.connection_url(&config_path));
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(InfraError::from(e).into());
        }
    };
    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(InfraError::from(e).into());
    }

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::with_default_granularity(
        db.clone(),
        app_cfg.booking.default_slot_granularity_minutes,
    ));

    // ── Services & router ──────────────────────────────────────
    let bookings = BookingService::new(repos.clone(), app_cfg.booking.initial_status.into());
    let router = create_api_router(
        AppState::new(repos, bookings),
        HealthState::new(Some(db.clone())),
        metrics_state,
    );

    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(InfraError::from)?;
    info!("REST API listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let drain_signal = shutdown_signal.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown_signal.wait().await;
        info!("REST API received shutdown signal");
    });

    // In-flight requests get `shutdown_timeout` seconds to finish
    let drain_secs = shutdown.timeout_secs();
    let result = tokio::select! {
        result = server.into_future() => result,
        _ = async {
            drain_signal.wait().await;
            tokio::time::sleep(Duration::from_secs(drain_secs)).await;
        } => {
            warn!("Graceful shutdown timed out after {}s, dropping open connections", drain_secs);
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("REST API server error: {}", e);
    }

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Slotbook service shutdown complete");
    result.map_err(|e| InfraError::from(e).into())
}
