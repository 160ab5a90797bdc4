//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `SELLER_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Document store migrations live in `crates/seller/migrations/` and are
//! embedded at compile time. The session table is created by
//! `tower-sessions-sqlx-store`.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Resolve the database URL from a variable lookup.
fn database_url(get: impl Fn(&str) -> Option<String>) -> Result<SecretString, MigrationError> {
    get("SELLER_DATABASE_URL")
        .or_else(|| get("DATABASE_URL"))
        .filter(|url| !url.is_empty())
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("SELLER_DATABASE_URL"))
}

/// Run the seller migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run(sessions_only: bool) -> Result<(), MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url(|key| std::env::var(key).ok())?;

    tracing::info!("Connecting to seller database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    if !sessions_only {
        tracing::info!("Running document store migrations...");
        sqlx::migrate!("../seller/migrations").run(&pool).await?;
    }

    tracing::info!("Creating session store table...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_prefers_seller_database_url() {
        let url = database_url(|key| match key {
            "SELLER_DATABASE_URL" => Some("postgres://seller".to_string()),
            "DATABASE_URL" => Some("postgres://shared".to_string()),
            _ => None,
        });
        assert!(matches!(url, Ok(u) if u.expose_secret() == "postgres://seller"));
    }

    #[test]
    fn test_falls_back_to_database_url() {
        let url = database_url(|key| {
            (key == "DATABASE_URL").then(|| "postgres://shared".to_string())
        });
        assert!(matches!(url, Ok(u) if u.expose_secret() == "postgres://shared"));
    }

    #[test]
    fn test_missing_url() {
        let url = database_url(|_| None);
        assert!(matches!(
            url,
            Err(MigrationError::MissingEnvVar("SELLER_DATABASE_URL"))
        ));
    }
}
