use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One aggregated leaderboard slot: a player and their summed playtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub username: String,
    pub total_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub total_seconds: u64,
    /// Human-readable "HHh MMm SSs" rendering of `total_seconds`.
    pub total_playtime: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardRow>,
}
