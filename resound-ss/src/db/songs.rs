//! Song catalog persistence

use sqlx::SqlitePool;

use crate::validation::Song;

/// SQLite extended result codes for key conflicts
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

/// Outcome of an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Created,
    /// A row with this id already exists; nothing was written
    Duplicate,
}

#[derive(Debug, Clone)]
pub struct SongStore {
    pool: SqlitePool,
}

impl SongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a song, relying on the primary key to reject duplicates
    pub async fn insert(&self, song: &Song) -> Result<InsertResult, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO songs (id, name, artist, album, duration, year)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(song.id)
        .bind(&song.name)
        .bind(&song.artist)
        .bind(&song.album)
        .bind(&song.duration)
        .bind(&song.year)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertResult::Created),
            Err(e) if is_unique_violation(&e) => Ok(InsertResult::Duplicate),
            Err(e) => Err(e),
        }
    }

    pub async fn find(&self, id: i64) -> Result<Option<Song>, sqlx::Error> {
        let row = sqlx::query_as::<_, (i64, String, String, String, String, String)>(
            "SELECT id, name, artist, album, duration, year FROM songs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, name, artist, album, duration, year)| Song {
            id,
            name,
            artist,
            album,
            duration,
            year,
        }))
    }

    /// Delete one song; `false` when it did not exist
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    let Some(db_err) = err.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
        || matches!(
            db_err.code().as_deref(),
            Some(SQLITE_CONSTRAINT_PRIMARYKEY) | Some(SQLITE_CONSTRAINT_UNIQUE)
        )
}
