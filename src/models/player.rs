use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An autocomplete choice in the shape the host platform expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlayerChoice {
    pub name: String,
    pub value: String,
}
