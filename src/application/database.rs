use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::migrations::Migrator;

pub type DbConn = DatabaseConnection;

/// Open the configured database and bring its schema up to date
pub async fn connect() -> Result<DbConn> {
    connect_with_url(&CONFIG.database.database_url).await
}

/// Open `database_url` (Postgres or SQLite) and apply pending migrations
pub async fn connect_with_url(database_url: &str) -> Result<DbConn> {
    tracing::info!(target_db = %redact_url(database_url), "Connecting to database");

    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(CONFIG.database.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))?;

    let pending = Migrator::get_pending_migrations(&db)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read migration state: {}", e)))?
        .len();
    if pending > 0 {
        tracing::info!(pending, "Applying database migrations");
        Migrator::up(&db, None)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;
    }
    tracing::info!(backend = ?db.get_database_backend(), "Database ready");

    Ok(db)
}

/// Strip the password from a connection URL before it is logged
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{}://{}:***@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_password() {
        assert_eq!(
            redact_url("postgres://propdesk:s3cret@db:5432/propdesk"),
            "postgres://propdesk:***@db:5432/propdesk"
        );
    }

    #[test]
    fn test_redact_leaves_sqlite_alone() {
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(redact_url("sqlite://data.db"), "sqlite://data.db");
    }
}
