//! Text entry endpoints
//!
//! Entry creation runs the emotion analysis pipeline inline: the entry is
//! persisted first, then its analysis record. Classification cannot fail
//! for non-empty content (the pipeline degrades internally), so a created
//! entry always carries an analysis.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AuthUser;
use crate::db::analysis::EmotionAnalysisRow;
use crate::db::entries::{EntryWithEmotion, TextEntry};
use crate::db::{analysis, entries};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Created entry with its analysis attached
#[derive(Debug, Serialize)]
pub struct CreatedEntry {
    #[serde(flatten)]
    pub entry: TextEntry,
    pub emotion: EmotionAnalysisRow,
}

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub message: String,
    pub entry: CreatedEntry,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryWithEmotion>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub entry: EntryWithEmotion,
}

/// POST /api/entries
pub async fn create_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<CreateEntryResponse>)> {
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Content cannot be empty".to_string()));
    }

    let entry = entries::insert_entry(&state.db, user.user_id, &req.content).await?;

    // Input was validated above, so the analyzer cannot reject it
    let result = state
        .analyzer
        .analyze(&req.content)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let analysis = analysis::insert_analysis(&state.db, entry.id, &result).await?;

    debug!(
        entry_id = entry.id,
        emotion = %analysis.emotion,
        confidence = analysis.confidence,
        "Entry created and analyzed"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            message: "Entry created successfully".to_string(),
            entry: CreatedEntry {
                entry,
                emotion: analysis,
            },
        }),
    ))
}

/// GET /api/entries
pub async fn list_entries(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<EntriesResponse>> {
    let limit = params.limit.unwrap_or(50);
    let offset = params.offset.unwrap_or(0);

    let entries = entries::list_for_user(&state.db, user.user_id, limit, offset).await?;
    let count = entries.len();

    Ok(Json(EntriesResponse { entries, count }))
}

/// GET /api/entries/:id
pub async fn get_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<i64>,
) -> ApiResult<Json<EntryResponse>> {
    let entry = entries::get_for_user(&state.db, entry_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Entry not found".to_string()))?;

    Ok(Json(EntryResponse { entry }))
}

/// Build entry routes
pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/api/entries", post(create_entry).get(list_entries))
        .route("/api/entries/:id", get(get_entry))
}
