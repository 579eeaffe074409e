pub mod lastseen;
pub mod leaderboard;
pub mod players;
pub mod report;
