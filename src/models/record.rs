use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One play session as embedded in the database channel.
///
/// `username` and `duration` are required; a payload missing either is
/// skipped by the scan. The timestamps are kept as opaque strings, the
/// upstream logger owns their format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub username: String,
    pub duration: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub joined_at: Option<String>,
    #[serde(default)]
    pub left_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LastSeenResponse {
    pub username: String,
    pub place: String,
    pub joined_at: String,
    pub left_at: String,
}

impl From<SessionRecord> for LastSeenResponse {
    fn from(record: SessionRecord) -> Self {
        Self {
            username: record.username,
            place: record.place.unwrap_or_else(|| "Unknown".to_string()),
            joined_at: record.joined_at.unwrap_or_else(|| "-".to_string()),
            left_at: record.left_at.unwrap_or_else(|| "-".to_string()),
        }
    }
}
