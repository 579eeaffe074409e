use std::collections::HashMap;

use futures::pin_mut;
use futures::stream::{Stream, StreamExt};

use crate::error::AppError;
use crate::models::leaderboard::LeaderboardEntry;
use crate::models::record::SessionRecord;
use crate::models::report::PlayerReport;
use crate::utils::parse_duration;

pub const LEADERBOARD_SIZE: usize = 10;

/// Fold every record into per-player totals and keep the top ten.
/// Ties are broken alphabetically by username so the ordering does not
/// depend on scan order.
pub async fn build_leaderboard<S>(records: S) -> Vec<LeaderboardEntry>
where
    S: Stream<Item = SessionRecord>,
{
    pin_mut!(records);

    let mut totals: HashMap<String, u64> = HashMap::new();
    while let Some(record) = records.next().await {
        *totals.entry(record.username).or_insert(0) += parse_duration(&record.duration);
    }

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .map(|(username, total_seconds)| LeaderboardEntry {
            username,
            total_seconds,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_seconds
            .cmp(&a.total_seconds)
            .then_with(|| a.username.cmp(&b.username))
    });
    entries.truncate(LEADERBOARD_SIZE);
    entries
}

/// First matching record wins. The scan yields newest first, so the first
/// hit is the most recent session and the rest of the history is never
/// fetched.
pub async fn find_most_recent<S>(records: S, username: &str) -> Option<SessionRecord>
where
    S: Stream<Item = SessionRecord>,
{
    pin_mut!(records);

    while let Some(record) = records.next().await {
        if record.username == username {
            return Some(record);
        }
    }
    None
}

/// Collect a player's full session history, oldest first, with totals.
pub async fn build_report<S>(records: S, username: &str) -> Result<PlayerReport, AppError>
where
    S: Stream<Item = SessionRecord>,
{
    pin_mut!(records);

    let mut sessions = Vec::new();
    while let Some(record) = records.next().await {
        if record.username == username {
            sessions.push(record);
        }
    }

    if sessions.is_empty() {
        return Err(AppError::NoDataForPlayer(username.to_string()));
    }

    // Scan order is newest-first; the chart wants chronological order.
    sessions.reverse();

    let total_seconds = sessions
        .iter()
        .map(|record| parse_duration(&record.duration))
        .sum();

    Ok(PlayerReport {
        username: username.to_string(),
        total_seconds,
        session_count: sessions.len(),
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::stream;

    use super::*;

    fn record(username: &str, duration: &str) -> SessionRecord {
        SessionRecord {
            username: username.to_string(),
            duration: duration.to_string(),
            place: None,
            joined_at: None,
            left_at: None,
        }
    }

    fn record_at(username: &str, duration: &str, joined_at: &str) -> SessionRecord {
        SessionRecord {
            joined_at: Some(joined_at.to_string()),
            ..record(username, duration)
        }
    }

    #[tokio::test]
    async fn leaderboard_sums_and_sorts_descending() {
        let records = stream::iter(vec![
            record("alice", "01h 00m 00s"),
            record("bob", "02h 00m 00s"),
            record("alice", "00h 30m 00s"),
        ]);

        let entries = build_leaderboard(records).await;
        assert_eq!(
            entries,
            vec![
                LeaderboardEntry {
                    username: "bob".to_string(),
                    total_seconds: 7200
                },
                LeaderboardEntry {
                    username: "alice".to_string(),
                    total_seconds: 5400
                },
            ]
        );
    }

    #[tokio::test]
    async fn leaderboard_is_capped_at_ten() {
        let records = stream::iter(
            (0..15).map(|i| record(&format!("player{:02}", i), "01h 00m 00s")),
        );

        let entries = build_leaderboard(records).await;
        assert_eq!(entries.len(), LEADERBOARD_SIZE);
    }

    #[tokio::test]
    async fn leaderboard_breaks_ties_alphabetically() {
        let records = stream::iter(vec![
            record("zoe", "01h 00m 00s"),
            record("amy", "01h 00m 00s"),
            record("mia", "01h 00m 00s"),
        ]);

        let entries = build_leaderboard(records).await;
        let names: Vec<_> = entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "mia", "zoe"]);
    }

    #[tokio::test]
    async fn leaderboard_counts_malformed_durations_as_zero() {
        let records = stream::iter(vec![
            record("alice", "01h 00m 00s"),
            record("alice", "not a duration"),
        ]);

        let entries = build_leaderboard(records).await;
        assert_eq!(entries[0].total_seconds, 3600);
    }

    #[tokio::test]
    async fn empty_scan_yields_empty_leaderboard() {
        let entries = build_leaderboard(stream::iter(Vec::<SessionRecord>::new())).await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn most_recent_is_the_first_match() {
        let records = stream::iter(vec![
            record_at("bob", "01h 00m 00s", "2024-03-01T10:00:00Z"),
            record_at("alice", "00h 10m 00s", "2024-02-20T10:00:00Z"),
            record_at("alice", "00h 20m 00s", "2024-01-01T10:00:00Z"),
        ]);

        let found = find_most_recent(records, "alice").await.unwrap();
        assert_eq!(found.joined_at.as_deref(), Some("2024-02-20T10:00:00Z"));
    }

    #[tokio::test]
    async fn most_recent_stops_consuming_after_the_match() {
        let seen = Cell::new(0usize);
        let records = stream::iter(vec![
            record("bob", "01h 00m 00s"),
            record("alice", "00h 10m 00s"),
            record("carol", "00h 20m 00s"),
        ])
        .map(|r| {
            seen.set(seen.get() + 1);
            r
        });

        let found = find_most_recent(records, "alice").await;
        assert!(found.is_some());
        assert_eq!(seen.get(), 2);
    }

    #[tokio::test]
    async fn most_recent_of_unknown_player_is_none() {
        let records = stream::iter(vec![record("bob", "01h 00m 00s")]);
        assert!(find_most_recent(records, "alice").await.is_none());
    }

    #[tokio::test]
    async fn report_totals_and_orders_chronologically() {
        let records = stream::iter(vec![
            record_at("alice", "00h 30m 00s", "2024-03-01"),
            record_at("bob", "09h 00m 00s", "2024-02-15"),
            record_at("alice", "01h 00m 00s", "2024-01-10"),
        ]);

        let report = build_report(records, "alice").await.unwrap();
        assert_eq!(report.session_count, 2);
        assert_eq!(report.total_seconds, 5400);
        // Oldest session first.
        assert_eq!(report.sessions[0].joined_at.as_deref(), Some("2024-01-10"));
        assert_eq!(report.sessions[1].joined_at.as_deref(), Some("2024-03-01"));
    }

    #[tokio::test]
    async fn report_without_sessions_is_no_data() {
        let records = stream::iter(vec![record("bob", "01h 00m 00s")]);
        let err = build_report(records, "alice").await.unwrap_err();
        assert!(matches!(err, AppError::NoDataForPlayer(name) if name == "alice"));
    }
}
