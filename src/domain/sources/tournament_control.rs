//! Source trait for tournament lifecycle, scoring and leaderboards.

use serde::Deserialize;

use crate::domain::entities::{PlayerStanding, TeamStanding};
use crate::error::AppError;
use async_trait::async_trait;

/// Confirmation returned by control operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlAck {
    #[serde(default)]
    pub message: String,
    /// Number of rounds touched, for the activate operations.
    #[serde(default)]
    pub affected_count: Option<i64>,
}

/// Result of closing a player or team round.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoundClose {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub holes_played: i64,
}

/// Result of a leaderboard recompute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardRefresh {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub updated_player_rounds: i64,
    #[serde(default)]
    pub updated_team_rounds: i64,
}

/// Control surface of the tournament API.
///
/// Everything a live event needs once cards are printed: starting and
/// ending tournaments, activating rounds as teams tee off, recording
/// scores, and recomputing/fetching leaderboards.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::TournamentApi`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TournamentControl: Send + Sync {
    /// Probes the API before issuing control calls.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] when the API is unreachable.
    async fn health(&self) -> Result<(), AppError>;

    /// Marks a tournament as running.
    async fn start_tournament(&self, tournament: &str) -> Result<ControlAck, AppError>;

    /// Marks a tournament as finished.
    async fn end_tournament(&self, tournament: &str) -> Result<ControlAck, AppError>;

    /// Activates a team's round in a tournament.
    async fn activate_team_round(
        &self,
        tournament: &str,
        team_number: i64,
    ) -> Result<ControlAck, AppError>;

    /// Activates one player's round within a team's round.
    async fn activate_player_round(
        &self,
        tournament: &str,
        team_number: i64,
        player_number: i64,
    ) -> Result<ControlAck, AppError>;

    /// Closes a player's round and returns their final numbers.
    async fn end_player_round(
        &self,
        player_number: i64,
        tournament: &str,
    ) -> Result<RoundClose, AppError>;

    /// Closes a team's round and returns the team's final numbers.
    async fn end_team_round(
        &self,
        team_number: i64,
        tournament: &str,
    ) -> Result<RoundClose, AppError>;

    /// Records one stroke count for a player on a hole.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ApiStatus`] when the player has no active round
    /// on that course.
    async fn record_score(
        &self,
        player_number: i64,
        course_name: &str,
        hole_number: i64,
        score: i64,
    ) -> Result<ControlAck, AppError>;

    /// Recomputes ranks from the recorded scores.
    async fn update_leaderboard(&self) -> Result<LeaderboardRefresh, AppError>;

    /// Fetches the team leaderboard for a tournament.
    async fn team_leaderboard(&self, tournament: &str) -> Result<Vec<TeamStanding>, AppError>;

    /// Fetches the player leaderboard for a tournament.
    async fn player_leaderboard(&self, tournament: &str) -> Result<Vec<PlayerStanding>, AppError>;
}
