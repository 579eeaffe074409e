use std::env;

use crate::error::AppError;

/// Process-wide configuration, read once at startup.
///
/// The token is the bot's secret; the three ids pin the guild being
/// tracked, the channel holding the session records, and the channel
/// reports are delivered to.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub guild_id: u64,
    pub database_channel_id: u64,
    pub reports_channel_id: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_token: required_var("DISCORD_TOKEN")?,
            guild_id: id_var("GUILD_ID")?,
            database_channel_id: id_var("DATABASE_CHANNEL_ID")?,
            reports_channel_id: id_var("REPORTS_CHANNEL_ID")?,
        })
    }
}

fn required_var(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{} must be set", key)))
}

fn id_var(key: &str) -> Result<u64, AppError> {
    required_var(key)?
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a numeric snowflake id", key)))
}
