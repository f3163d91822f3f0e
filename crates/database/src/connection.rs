use crate::error::DbError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Opens a connection pool to the SQLite database at `database_url`.
///
/// The database file is created if it does not exist yet. Use
/// `sqlite::memory:` with a single connection for a throwaway store.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    if database_url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "database url must not be empty".to_string(),
        ));
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::debug!(url = database_url, max_connections, "Connected to trade store");
    Ok(pool)
}

/// Applies the embedded migrations so the `trades` table exists.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
