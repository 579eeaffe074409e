use std::collections::BTreeSet;

use futures::stream::{Stream, StreamExt};
use futures::pin_mut;
use regex::Regex;
use thiserror::Error;

use crate::models::record::SessionRecord;
use crate::services::discord::{DiscordMessage, DiscordService};

/// How far back the leaderboard / lastseen / report scans look.
pub const HISTORY_SCAN_LIMIT: usize = 2000;

/// How far back the known-player scan looks. Autocomplete runs on every
/// keystroke, so it gets a tighter bound.
pub const PLAYER_SCAN_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum RecordParseError {
    #[error("message has no json block")]
    MissingBlock,

    #[error("invalid record payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Extract and parse the fenced `json` block from a message body.
///
/// Only the first block is considered, everything between the ```json
/// marker and the next closing fence. The explicit error lets the scan
/// loop tell "not a record at all" apart from "broken record".
pub fn parse_record(content: &str) -> Result<SessionRecord, RecordParseError> {
    let fence = Regex::new(r"(?s)```json(.*?)```").unwrap();
    let block = fence
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or(RecordParseError::MissingBlock)?;

    let record = serde_json::from_str(block.as_str())?;
    Ok(record)
}

fn record_stream<S>(messages: S) -> impl Stream<Item = SessionRecord>
where
    S: Stream<Item = DiscordMessage>,
{
    messages.filter_map(|msg| async move {
        match parse_record(&msg.content) {
            Ok(record) => Some(record),
            // Most messages in a busy channel are just chatter.
            Err(RecordParseError::MissingBlock) => None,
            Err(e) => {
                tracing::debug!("Skipping malformed record in message {}: {}", msg.id, e);
                None
            }
        }
    })
}

/// Scan up to `limit` recent messages of a channel and yield every session
/// record found, newest first. Lazy: records are produced as pages arrive
/// and the scan stops as soon as the consumer does.
pub fn scan_records(
    discord: &DiscordService,
    channel_id: u64,
    limit: usize,
) -> impl Stream<Item = SessionRecord> + '_ {
    record_stream(discord.message_history(channel_id, limit))
}

/// Every distinct username seen in the channel, alphabetically sorted.
pub async fn list_known_players(discord: &DiscordService, channel_id: u64) -> BTreeSet<String> {
    let records = scan_records(discord, channel_id, PLAYER_SCAN_LIMIT);
    pin_mut!(records);

    let mut players = BTreeSet::new();
    while let Some(record) = records.next().await {
        players.insert(record.username);
    }
    players
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;

    fn message(id: &str, content: &str) -> DiscordMessage {
        DiscordMessage {
            id: id.to_string(),
            content: content.to_string(),
        }
    }

    const GOOD_RECORD: &str = r#"
Session logged:
```json
{"username": "kai", "place": "Lobby", "joinedAt": "2024-01-15T18:00:00Z", "leftAt": "2024-01-15T20:30:00Z", "duration": "02h 30m 00s"}
```
"#;

    #[test]
    fn parses_record_between_fences() {
        let record = parse_record(GOOD_RECORD).unwrap();
        assert_eq!(record.username, "kai");
        assert_eq!(record.duration, "02h 30m 00s");
        assert_eq!(record.place.as_deref(), Some("Lobby"));
        assert_eq!(record.joined_at.as_deref(), Some("2024-01-15T18:00:00Z"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let record =
            parse_record("```json\n{\"username\": \"kai\", \"duration\": \"00h 10m 00s\"}\n```")
                .unwrap();
        assert_eq!(record.username, "kai");
        assert!(record.place.is_none());
        assert!(record.joined_at.is_none());
        assert!(record.left_at.is_none());
    }

    #[test]
    fn message_without_block_is_not_a_record() {
        assert!(matches!(
            parse_record("just chatting about the game"),
            Err(RecordParseError::MissingBlock)
        ));
    }

    #[test]
    fn broken_payload_is_an_error() {
        assert!(matches!(
            parse_record("```json\n{not valid json}\n```"),
            Err(RecordParseError::Payload(_))
        ));
        // Required field missing entirely.
        assert!(matches!(
            parse_record("```json\n{\"duration\": \"00h 10m 00s\"}\n```"),
            Err(RecordParseError::Payload(_))
        ));
    }

    #[tokio::test]
    async fn scan_skips_bad_messages_without_stopping() {
        let messages = stream::iter(vec![
            message("3", GOOD_RECORD),
            message("2", "```json\n{broken\n```"),
            message("1", "no block here"),
            message(
                "0",
                "```json\n{\"username\": \"rin\", \"duration\": \"01h 00m 00s\"}\n```",
            ),
        ]);

        let records: Vec<_> = record_stream(messages).collect().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].username, "kai");
        assert_eq!(records[1].username, "rin");
    }
}
