//! Emotion analysis records and analytics aggregation

use chrono::NaiveDateTime;
use drift_common::{EmotionResult, Result};
use serde::Serialize;
use sqlx::SqlitePool;

/// Persisted analysis row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmotionAnalysisRow {
    pub id: i64,
    pub entry_id: i64,
    pub emotion: String,
    pub confidence: f64,
    pub joy_score: f64,
    pub sadness_score: f64,
    pub anger_score: f64,
    pub fear_score: f64,
    pub surprise_score: f64,
    pub neutral_score: f64,
    pub analyzed_at: NaiveDateTime,
}

/// Persist an analysis result for an entry, returning the created row
pub async fn insert_analysis(
    pool: &SqlitePool,
    entry_id: i64,
    result: &EmotionResult,
) -> Result<EmotionAnalysisRow> {
    let row = sqlx::query_as::<_, EmotionAnalysisRow>(
        r#"
        INSERT INTO emotion_analysis
            (entry_id, emotion, confidence, joy_score, sadness_score,
             anger_score, fear_score, surprise_score, neutral_score)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        RETURNING id, entry_id, emotion, confidence, joy_score, sadness_score,
                  anger_score, fear_score, surprise_score, neutral_score, analyzed_at
        "#,
    )
    .bind(entry_id)
    .bind(result.emotion.as_str())
    .bind(result.confidence)
    .bind(result.scores.joy)
    .bind(result.scores.sadness)
    .bind(result.scores.anger)
    .bind(result.scores.fear)
    .bind(result.scores.surprise)
    .bind(result.scores.neutral)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// One day of averaged scores
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TimelinePoint {
    pub date: String,
    pub avg_joy: f64,
    pub avg_sadness: f64,
    pub avg_anger: f64,
    pub avg_fear: f64,
    pub avg_surprise: f64,
    pub avg_neutral: f64,
    pub entry_count: i64,
}

/// Per-day average scores over the trailing window, ascending by date
pub async fn timeline(pool: &SqlitePool, user_id: i64, days: i64) -> Result<Vec<TimelinePoint>> {
    let window = format!("-{} days", days);

    let points = sqlx::query_as::<_, TimelinePoint>(
        r#"
        SELECT
            DATE(te.timestamp) AS date,
            AVG(ea.joy_score) AS avg_joy,
            AVG(ea.sadness_score) AS avg_sadness,
            AVG(ea.anger_score) AS avg_anger,
            AVG(ea.fear_score) AS avg_fear,
            AVG(ea.surprise_score) AS avg_surprise,
            AVG(ea.neutral_score) AS avg_neutral,
            COUNT(*) AS entry_count
        FROM text_entries te
        JOIN emotion_analysis ea ON te.id = ea.entry_id
        WHERE te.user_id = ?1
          AND te.timestamp >= datetime('now', ?2)
        GROUP BY DATE(te.timestamp)
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .bind(window)
    .fetch_all(pool)
    .await?;

    Ok(points)
}

/// Overall per-category averages
///
/// Averages are NULL (None) when the user has no analyzed entries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OverallStats {
    pub total_entries: i64,
    pub avg_joy: Option<f64>,
    pub avg_sadness: Option<f64>,
    pub avg_anger: Option<f64>,
    pub avg_fear: Option<f64>,
    pub avg_surprise: Option<f64>,
    pub avg_neutral: Option<f64>,
}

pub async fn overall_stats(pool: &SqlitePool, user_id: i64) -> Result<OverallStats> {
    let stats = sqlx::query_as::<_, OverallStats>(
        r#"
        SELECT
            COUNT(*) AS total_entries,
            AVG(ea.joy_score) AS avg_joy,
            AVG(ea.sadness_score) AS avg_sadness,
            AVG(ea.anger_score) AS avg_anger,
            AVG(ea.fear_score) AS avg_fear,
            AVG(ea.surprise_score) AS avg_surprise,
            AVG(ea.neutral_score) AS avg_neutral
        FROM text_entries te
        JOIN emotion_analysis ea ON te.id = ea.entry_id
        WHERE te.user_id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(stats)
}

/// Emotion frequency bucket
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: i64,
}

/// The user's most frequent dominant emotion, if any entries exist
pub async fn dominant_emotion(pool: &SqlitePool, user_id: i64) -> Result<Option<EmotionCount>> {
    let bucket = sqlx::query_as::<_, EmotionCount>(
        r#"
        SELECT emotion, COUNT(*) AS count
        FROM text_entries te
        JOIN emotion_analysis ea ON te.id = ea.entry_id
        WHERE te.user_id = ?1
        GROUP BY emotion
        ORDER BY count DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(bucket)
}

/// Emotion frequency distribution, most frequent first
pub async fn distribution(pool: &SqlitePool, user_id: i64) -> Result<Vec<EmotionCount>> {
    let buckets = sqlx::query_as::<_, EmotionCount>(
        r#"
        SELECT emotion, COUNT(*) AS count
        FROM text_entries te
        JOIN emotion_analysis ea ON te.id = ea.entry_id
        WHERE te.user_id = ?1
        GROUP BY emotion
        ORDER BY count DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(buckets)
}
