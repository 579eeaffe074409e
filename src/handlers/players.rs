use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::player::PlayerChoice;
use crate::services::record_store::list_known_players;
use crate::AppState;

/// The host platform shows at most 25 suggestions.
const MAX_CHOICES: usize = 25;

#[derive(Deserialize)]
pub struct PlayerFilter {
    search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/players",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter")
    ),
    responses(
        (status = 200, description = "Known player autocomplete choices", body = Vec<PlayerChoice>)
    )
)]
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayerFilter>,
) -> impl IntoResponse {
    let players = list_known_players(&state.discord, state.config.database_channel_id).await;
    let choices = filter_choices(
        players.iter().map(String::as_str),
        params.search.as_deref().unwrap_or(""),
    );

    (StatusCode::OK, Json(choices))
}

/// Case-insensitive substring filter over an already-sorted player list,
/// capped at the platform's choice limit.
fn filter_choices<'a>(
    players: impl IntoIterator<Item = &'a str>,
    query: &str,
) -> Vec<PlayerChoice> {
    let needle = query.to_lowercase();

    players
        .into_iter()
        .filter(|player| player.to_lowercase().contains(&needle))
        .take(MAX_CHOICES)
        .map(|player| PlayerChoice {
            name: player.to_string(),
            value: player.to_string(),
        })
        .collect()
}
