//! Analytics endpoints: emotion timeline and aggregate statistics

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::db::analysis::{self, EmotionCount, OverallStats, TimelinePoint};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TimelineParams {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: OverallStats,
    pub dominant_emotion: Option<EmotionCount>,
    pub distribution: Vec<EmotionCount>,
}

/// GET /api/analytics/timeline
///
/// Per-day average scores over the trailing window (default 30 days).
pub async fn timeline(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TimelineParams>,
) -> ApiResult<Json<TimelineResponse>> {
    let days = params.days.unwrap_or(30);
    let timeline = analysis::timeline(&state.db, user.user_id, days).await?;

    Ok(Json(TimelineResponse { timeline }))
}

/// GET /api/analytics/stats
///
/// Overall averages, most frequent dominant emotion, and the emotion
/// frequency distribution.
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<StatsResponse>> {
    let stats = analysis::overall_stats(&state.db, user.user_id).await?;
    let dominant_emotion = analysis::dominant_emotion(&state.db, user.user_id).await?;
    let distribution = analysis::distribution(&state.db, user.user_id).await?;

    Ok(Json(StatsResponse {
        stats,
        dominant_emotion,
        distribution,
    }))
}

/// Build analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analytics/timeline", get(timeline))
        .route("/api/analytics/stats", get(stats))
}
