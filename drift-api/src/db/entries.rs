//! Text entry records

use chrono::NaiveDateTime;
use drift_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Text entry row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TextEntry {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Entry joined with its analysis
///
/// Analysis columns are nullable: an entry whose analysis row is missing
/// (LEFT JOIN miss) still lists with empty emotion fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EntryWithEmotion {
    pub id: i64,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub emotion: Option<String>,
    pub confidence: Option<f64>,
    pub joy_score: Option<f64>,
    pub sadness_score: Option<f64>,
    pub anger_score: Option<f64>,
    pub fear_score: Option<f64>,
    pub surprise_score: Option<f64>,
    pub neutral_score: Option<f64>,
}

/// Insert a new entry, returning the created row
pub async fn insert_entry(pool: &SqlitePool, user_id: i64, content: &str) -> Result<TextEntry> {
    let entry = sqlx::query_as::<_, TextEntry>(
        r#"
        INSERT INTO text_entries (user_id, content)
        VALUES (?1, ?2)
        RETURNING id, user_id, content, timestamp, created_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

/// List a user's entries with their analyses, newest first
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<EntryWithEmotion>> {
    let entries = sqlx::query_as::<_, EntryWithEmotion>(
        r#"
        SELECT
            te.id, te.content, te.timestamp, te.created_at,
            ea.emotion, ea.confidence,
            ea.joy_score, ea.sadness_score, ea.anger_score,
            ea.fear_score, ea.surprise_score, ea.neutral_score
        FROM text_entries te
        LEFT JOIN emotion_analysis ea ON te.id = ea.entry_id
        WHERE te.user_id = ?1
        ORDER BY te.timestamp DESC, te.id DESC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Fetch one entry scoped to its owner
pub async fn get_for_user(
    pool: &SqlitePool,
    entry_id: i64,
    user_id: i64,
) -> Result<Option<EntryWithEmotion>> {
    let entry = sqlx::query_as::<_, EntryWithEmotion>(
        r#"
        SELECT
            te.id, te.content, te.timestamp, te.created_at,
            ea.emotion, ea.confidence,
            ea.joy_score, ea.sadness_score, ea.anger_score,
            ea.fear_score, ea.surprise_score, ea.neutral_score
        FROM text_entries te
        LEFT JOIN emotion_analysis ea ON te.id = ea.entry_id
        WHERE te.id = ?1 AND te.user_id = ?2
        "#,
    )
    .bind(entry_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}
