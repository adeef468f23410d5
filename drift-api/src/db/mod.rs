//! Database access for drift-api
//!
//! SQLite via a shared connection pool. The schema is created at startup
//! with `CREATE TABLE IF NOT EXISTS`; foreign keys are enforced so that
//! deleting a user cascades through entries and analyses.

pub mod analysis;
pub mod entries;
pub mod users;

use drift_common::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::path::Path;

/// Open the connection pool and initialize the schema
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::debug!("Connecting to database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;
    init_schema(&pool).await?;

    Ok(pool)
}

/// Create tables and indexes if they don't exist
///
/// Also exposed to tests, which run it against in-memory pools.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // Users table for authentication
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Text entries submitted by users
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS text_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            content TEXT NOT NULL,
            timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Emotion analysis results, one row per analyzed entry
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS emotion_analysis (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_id INTEGER NOT NULL,
            emotion TEXT NOT NULL,
            confidence REAL,
            joy_score REAL DEFAULT 0,
            sadness_score REAL DEFAULT 0,
            anger_score REAL DEFAULT 0,
            fear_score REAL DEFAULT 0,
            surprise_score REAL DEFAULT 0,
            neutral_score REAL DEFAULT 0,
            analyzed_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (entry_id) REFERENCES text_entries(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_text_entries_user_id ON text_entries(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_text_entries_timestamp ON text_entries(timestamp)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_emotion_analysis_entry_id ON emotion_analysis(entry_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (users, text_entries, emotion_analysis)");

    Ok(())
}
