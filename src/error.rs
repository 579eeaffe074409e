use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No recorded sessions for player '{0}'")]
    NoDataForPlayer(String),

    #[error("Reports channel is misconfigured, check the channel id")]
    MisconfiguredDestination,

    #[error("Discord API error: {0}")]
    Discord(#[from] reqwest::Error),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NoDataForPlayer(_) => StatusCode::NOT_FOUND,
            AppError::MisconfiguredDestination => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Discord(_)
            | AppError::Chart(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
