// SQLite-backed banned-word store.
//
// Tables:
// - banned_words: one row per lowercase word, insertion order kept by id

use crate::core::moderation::{WordStore, WordStoreError};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

pub struct SqliteWordStore {
    pool: Pool<Sqlite>,
}

impl SqliteWordStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file at `path` and run migrations.
    pub async fn open(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .connect(&format!("sqlite://{}?mode=rwc", path))
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), WordStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS banned_words (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT NOT NULL UNIQUE
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| WordStoreError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl WordStore for SqliteWordStore {
    async fn list_words(&self) -> Result<Vec<String>, WordStoreError> {
        let rows = sqlx::query("SELECT word FROM banned_words ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| WordStoreError::Storage(e.to_string()))?;

        Ok(rows.iter().map(|row| row.get::<String, _>("word")).collect())
    }

    async fn add_word(&self, word: &str) -> Result<bool, WordStoreError> {
        let result = sqlx::query("INSERT OR IGNORE INTO banned_words (word) VALUES (?)")
            .bind(word)
            .execute(&self.pool)
            .await
            .map_err(|e| WordStoreError::Storage(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_word(&self, word: &str) -> Result<u64, WordStoreError> {
        let result = sqlx::query("DELETE FROM banned_words WHERE word = ?")
            .bind(word)
            .execute(&self.pool)
            .await
            .map_err(|e| WordStoreError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
