use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::aggregate;
use crate::models::record::LastSeenResponse;
use crate::services::record_store::{scan_records, HISTORY_SCAN_LIMIT};
use crate::AppState;

#[derive(Deserialize)]
pub struct LastSeenQuery {
    player: String,
}

#[utoipa::path(
    get,
    path = "/api/lastseen",
    params(
        ("player" = String, Query, description = "Player username")
    ),
    responses(
        (status = 200, description = "Most recent session of the player", body = LastSeenResponse),
        (status = 404, description = "No records for the player")
    )
)]
pub async fn lastseen(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LastSeenQuery>,
) -> impl IntoResponse {
    let records = scan_records(
        &state.discord,
        state.config.database_channel_id,
        HISTORY_SCAN_LIMIT,
    );

    // The scan yields newest first, so the first hit ends it.
    match aggregate::find_most_recent(records, &params.player).await {
        Some(record) => (StatusCode::OK, Json(LastSeenResponse::from(record))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("No records found for player '{}'", params.player),
        )
            .into_response(),
    }
}
