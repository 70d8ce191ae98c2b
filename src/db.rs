//! Store bootstrap: open the pool and make sure the `users` table exists.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::Error;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
)";

/// Opens a pool against `url`, creating the database file if needed, then
/// creates the `users` table if it is absent.
///
/// An in-memory database lives and dies with its connection, so for those
/// URLs the pool is pinned to one connection that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
    if is_in_memory(url) {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;
    info!("connected to the store");

    create_schema(&pool).await?;
    info!("users table created or already exists");
    Ok(pool)
}

/// Idempotent; safe to run on every start.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    Ok(())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> Result<SqlitePool, Error> {
    connect("sqlite::memory:", 1).await
}
