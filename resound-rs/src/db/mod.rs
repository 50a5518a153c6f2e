//! Database access for resound-rs

pub mod resources;

pub use resources::ResourceStore;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "resources.db";

/// Open the resource database and create tables if missing
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    let pool = resound_common::db::init_database(db_path).await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// Create the `resources` table if it doesn't exist
///
/// AUTOINCREMENT keeps identifiers of deleted resources from being reused,
/// so a late catalog write can never attach to a newer upload.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resources (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            data BLOB NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (resources)");

    Ok(())
}
