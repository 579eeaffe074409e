use std::path::Path;

use futures::stream::{self, Stream, StreamExt};
use reqwest::header;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Discord caps history pages at 100 messages per request.
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct DiscordMessage {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            fields: Vec::new(),
            timestamp: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn timestamp_now(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

struct HistoryCursor {
    before: Option<String>,
    remaining: usize,
}

/// Thin client over the Discord REST API. Holds the only long-lived
/// connection state in the process; everything else is computed per request.
pub struct DiscordService {
    client: reqwest::Client,
    token: String,
}

impl DiscordService {
    pub fn new(token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    async fn fetch_history_page(
        &self,
        channel_id: u64,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<DiscordMessage>, AppError> {
        let mut url = format!(
            "{}/channels/{}/messages?limit={}",
            DISCORD_API_BASE, channel_id, limit
        );
        if let Some(before) = before {
            url.push_str("&before=");
            url.push_str(before);
        }

        let messages = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(messages)
    }

    /// Lazy walk over a channel's history, newest message first, up to
    /// `limit` messages. Pages are fetched on demand, so a consumer that
    /// stops early never pays for the rest of the scan. A failed page fetch
    /// ends the stream; the messages already seen stand.
    pub fn message_history(
        &self,
        channel_id: u64,
        limit: usize,
    ) -> impl Stream<Item = DiscordMessage> + '_ {
        let cursor = HistoryCursor {
            before: None,
            remaining: limit,
        };

        stream::unfold(cursor, move |cursor| async move {
            if cursor.remaining == 0 {
                return None;
            }

            let page_size = cursor.remaining.min(PAGE_SIZE);
            let page = match self
                .fetch_history_page(channel_id, page_size, cursor.before.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("History fetch failed for channel {}: {}", channel_id, e);
                    return None;
                }
            };

            if page.is_empty() {
                return None;
            }

            let next = HistoryCursor {
                before: page.last().map(|msg| msg.id.clone()),
                // A short page means the channel has no older messages.
                remaining: if page.len() < page_size {
                    0
                } else {
                    cursor.remaining.saturating_sub(page.len())
                },
            };

            Some((stream::iter(page), next))
        })
        .flatten()
    }

    pub async fn send_embed(&self, channel_id: u64, embed: &Embed) -> Result<(), AppError> {
        let url = format!("{}/channels/{}/messages", DISCORD_API_BASE, channel_id);

        self.client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .json(&serde_json::json!({ "embeds": [embed] }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub async fn send_file(
        &self,
        channel_id: u64,
        path: &Path,
        filename: &str,
    ) -> Result<(), AppError> {
        let url = format!("{}/channels/{}/messages", DISCORD_API_BASE, channel_id);

        let bytes = tokio::fs::read(path).await?;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("files[0]", part);

        self.client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
