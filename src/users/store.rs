//! Persistence accessor for the `users` table.
//!
//! Every statement binds caller data as parameters; nothing is interpolated
//! into SQL text. Each call is a single statement and relies on SQLite's
//! per-statement atomicity.

use sqlx::SqlitePool;
use tracing::debug;

use super::{StoreError, User};

const INSERT: &str = "INSERT INTO users (id, name) VALUES ($1, $2)";
const SELECT_BY_ID: &str = "SELECT id, name FROM users WHERE id = $1";
const UPDATE_NAME: &str = "UPDATE users SET name = $1 WHERE id = $2";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = $1";

/// Issues statements against the shared connection pool.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, id: i64, name: &str) -> Result<(), StoreError> {
        sqlx::query(INSERT)
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_insert(e, id))?;
        Ok(())
    }

    pub async fn fetch_by_id(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?
            .ok_or(StoreError::NotFound { id })
    }

    pub async fn update_name(&self, id: i64, name: &str) -> Result<(), StoreError> {
        let result = sqlx::query(UPDATE_NAME)
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        require_affected(result.rows_affected(), id)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        require_affected(result.rows_affected(), id)
    }

    /// Round-trips `SELECT 1`; used by the readiness probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

fn require_affected(rows: u64, id: i64) -> Result<(), StoreError> {
    if rows == 0 {
        return Err(StoreError::NotFound { id });
    }
    Ok(())
}

fn classify_insert(error: sqlx::Error, id: i64) -> StoreError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            debug!(id, message = db.message(), "insert rejected by unique constraint");
            return StoreError::ConstraintViolation { id };
        }
    }
    unavailable(error)
}

fn unavailable(error: sqlx::Error) -> StoreError {
    debug!(error = %error, "store operation failed");
    StoreError::StoreUnavailable(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn store() -> UserStore {
        UserStore::new(db::memory_pool().await.unwrap())
    }

    #[tokio::test]
    async fn insert_then_fetch() {
        let store = store().await;
        store.insert(1, "Alice").await.unwrap();
        let user = store.fetch_by_id(1).await.unwrap();
        assert_eq!(user, User { id: 1, name: "Alice".to_owned() });
    }

    #[tokio::test]
    async fn duplicate_insert_is_constraint_violation() {
        let store = store().await;
        store.insert(7, "first").await.unwrap();
        let err = store.insert(7, "second").await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { id: 7 }), "{err:?}");
        assert_eq!(store.fetch_by_id(7).await.unwrap().name, "first");
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = store().await;
        assert!(matches!(store.fetch_by_id(3).await, Err(StoreError::NotFound { id: 3 })));
        assert!(matches!(store.update_name(3, "x").await, Err(StoreError::NotFound { id: 3 })));
        assert!(matches!(store.delete_by_id(3).await, Err(StoreError::NotFound { id: 3 })));
    }

    #[tokio::test]
    async fn name_is_bound_not_interpolated() {
        let store = store().await;
        let hostile = "x'); DROP TABLE users; --";
        store.insert(9, hostile).await.unwrap();
        assert_eq!(store.fetch_by_id(9).await.unwrap().name, hostile);
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn closed_pool_is_unavailable() {
        let pool = db::memory_pool().await.unwrap();
        let store = UserStore::new(pool.clone());
        pool.close().await;
        assert!(matches!(store.fetch_by_id(1).await, Err(StoreError::StoreUnavailable(_))));
        assert!(matches!(store.ping().await, Err(StoreError::StoreUnavailable(_))));
    }
}
