use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tracing::{info, warn};

use crate::config::Config;

pub mod fixtures;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{RegistrationStore, StoredRegistration};

pub type DatabasePool = Pool<Postgres>;

pub async fn setup_database(database_url: &str, max_connections: u32) -> Result<DatabasePool> {
    info!("Connecting to registry database");

    if !(database_url.contains("sslmode=require")
        || database_url.contains("sslmode=verify-ca")
        || database_url.contains("sslmode=verify-full"))
    {
        warn!("Database connection does not enforce SSL. Consider adding sslmode=require to connection string");
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Duration::from_secs(180))
        .max_lifetime(Duration::from_secs(900))
        .test_before_acquire(true)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("SET timezone = 'UTC'").execute(&mut *conn).await?;
                sqlx::query("SET statement_timeout = '15s'").execute(&mut *conn).await?;
                sqlx::query("SET lock_timeout = '10s'").execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    let start_time = std::time::Instant::now();
    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("✅ Database connection established in {:?}", start_time.elapsed());

    Ok(pool)
}

pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Pick the registration store for this configuration: PostgreSQL when a
/// database URL is configured, otherwise the in-memory store.
pub async fn setup_store(config: &Config) -> Result<Arc<dyn RegistrationStore>> {
    let store: Arc<dyn RegistrationStore> = match &config.database_url {
        Some(url) => {
            let pool = setup_database(url, config.max_connections).await?;
            run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            if config.is_production() {
                anyhow::bail!("DATABASE_URL is required in production");
            }
            warn!("DATABASE_URL not set; registrations are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    if config.seed_test_data {
        fixtures::seed(store.as_ref()).await?;
    }

    Ok(store)
}
