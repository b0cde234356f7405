//! PostgreSQL pool setup

use std::time::Duration;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use crate::config::DatabaseConfig;
use crate::utils::errors::HeraldError;

pub type DatabasePool = PgPool;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(config.idle_timeout_secs.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_secs.map(Duration::from_secs))
}

/// Open the pool and make sure the server answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, HeraldError> {
    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connected to PostgreSQL"
    );
    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), HeraldError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Chat store schema is up to date");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<(), HeraldError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_options_follow_settings() {
        let config = DatabaseConfig {
            max_connections: 4,
            min_connections: 2,
            acquire_timeout_secs: 5,
            idle_timeout_secs: None,
            max_lifetime_secs: Some(60),
            ..Default::default()
        };

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 2);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(60)));
    }
}
