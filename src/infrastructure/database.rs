//! SQLite connection pool and schema bootstrap.

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::debug;

use crate::domain::errors::DomainError;

/// Single-table schema, executed once on startup.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS Commands (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    CommandLine TEXT NOT NULL,
    HowTo TEXT NOT NULL,
    Platform TEXT NOT NULL CHECK (length(Platform) <= 6)
);
";

/// Opens a pool against `database_url`, creating the database file if it
/// does not exist yet. Writers queue on the busy timeout instead of failing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DomainError::persistence(format!("invalid database url: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| DomainError::persistence(format!("failed to connect to database: {e}")))
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), DomainError> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| DomainError::persistence(format!("failed to initialize schema: {e}")))?;

    debug!("schema ready");
    Ok(())
}
