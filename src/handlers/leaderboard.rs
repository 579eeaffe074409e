use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::aggregate;
use crate::models::leaderboard::{LeaderboardResponse, LeaderboardRow};
use crate::services::record_store::{scan_records, HISTORY_SCAN_LIMIT};
use crate::utils::format_seconds;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Top players by total playtime", body = LeaderboardResponse),
        (status = 404, description = "No playtime records found")
    )
)]
pub async fn leaderboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records = scan_records(
        &state.discord,
        state.config.database_channel_id,
        HISTORY_SCAN_LIMIT,
    );
    let entries = aggregate::build_leaderboard(records).await;

    if entries.is_empty() {
        return (StatusCode::NOT_FOUND, "No playtime records found").into_response();
    }

    let rows: Vec<LeaderboardRow> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| LeaderboardRow {
            rank: i + 1,
            total_playtime: format_seconds(entry.total_seconds),
            username: entry.username,
            total_seconds: entry.total_seconds,
        })
        .collect();

    (StatusCode::OK, Json(LeaderboardResponse { entries: rows })).into_response()
}
