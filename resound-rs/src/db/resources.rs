//! Resource persistence
//!
//! Each operation is a single SQL statement, which makes it atomic per
//! record without an explicit transaction.

use sqlx::SqlitePool;

/// Raw audio bytes keyed by generated identifier
#[derive(Debug, Clone)]
pub struct ResourceStore {
    pool: SqlitePool,
}

impl ResourceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist bytes and return the new identifier (always > 0)
    pub async fn insert(&self, data: &[u8]) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO resources (data) VALUES (?)")
            .bind(data)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find(&self, id: i64) -> Result<Option<Vec<u8>>, sqlx::Error> {
        sqlx::query_scalar("SELECT data FROM resources WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete one resource; `false` when it did not exist
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> ResourceStore {
        let pool = resound_common::db::open_in_memory().await.unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        ResourceStore::new(pool)
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = store().await;

        let id = store.insert(b"ID3 bytes").await.unwrap();

        assert!(id > 0);
        assert_eq!(store.find(id).await.unwrap().as_deref(), Some(&b"ID3 bytes"[..]));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = store().await;
        assert_eq!(store.find(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = store().await;
        let id = store.insert(b"ID3").await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert_eq!(store.find(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = store().await;
        let first = store.insert(b"ID3").await.unwrap();
        store.delete(first).await.unwrap();

        let second = store.insert(b"ID3").await.unwrap();
        assert!(second > first);
    }
}
