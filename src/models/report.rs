use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::record::SessionRecord;

/// Aggregated activity for one player. `sessions` is ordered oldest-first
/// so the chart reads chronologically.
#[derive(Debug, Clone)]
pub struct PlayerReport {
    pub username: String,
    pub total_seconds: u64,
    pub session_count: usize,
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    pub player: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub message: String,
    pub channel_id: u64,
}
