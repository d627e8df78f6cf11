pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// How long a SQLite writer waits for another connection's lock before
/// giving up
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./slotbook.db?mode=rwc")
    pub url: String,
    /// Pool size; unset uses the driver default
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("sqlite://./slotbook.db?mode=rwc")
    }
}

impl DatabaseConfig {
    /// In-memory SQLite databases exist per connection, so they get a
    /// single-connection pool.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let max_connections = url.contains(":memory:").then_some(1);
        Self {
            url,
            max_connections,
        }
    }

    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self::new(format!("sqlite://{}?mode=rwc", path))
    }

    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(|opts| opts.busy_timeout(BUSY_TIMEOUT));
    if let Some(max) = config.max_connections {
        options.max_connections(max).min_connections(max);
    }
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    info!("Running database migrations");
    Migrator::up(db, None).await?;
    info!("Database migrations complete");
    Ok(())
}
