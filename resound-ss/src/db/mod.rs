//! Database access for resound-ss

pub mod songs;

pub use songs::SongStore;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "songs.db";

/// Open the catalog database and create tables if missing
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    let pool = resound_common::db::init_database(db_path).await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// Create the `songs` table if it doesn't exist
///
/// `id` is supplied by the caller (the resource id) and is the uniqueness
/// constraint behind duplicate-create detection.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            artist TEXT NOT NULL,
            album TEXT NOT NULL,
            duration TEXT NOT NULL,
            year TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (songs)");

    Ok(())
}
