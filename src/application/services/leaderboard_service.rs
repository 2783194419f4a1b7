//! Leaderboard recompute and fetch.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{PlayerStanding, TeamStanding, sort_by_rank};
use crate::domain::sources::{LeaderboardRefresh, TournamentControl};
use crate::error::AppError;

/// One refreshed leaderboard, ready for display.
#[derive(Debug, Clone)]
pub struct LeaderboardView {
    pub tournament: String,
    pub refresh: LeaderboardRefresh,
    pub rows: LeaderboardRows,
}

#[derive(Debug, Clone)]
pub enum LeaderboardRows {
    Teams(Vec<TeamStanding>),
    Players(Vec<PlayerStanding>),
}

impl LeaderboardRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Teams(rows) => rows.len(),
            Self::Players(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Recomputes standings on the tournament API and fetches them.
pub struct LeaderboardService<K> {
    control: Arc<K>,
}

impl<K> LeaderboardService<K>
where
    K: TournamentControl,
{
    pub fn new(control: Arc<K>) -> Self {
        Self { control }
    }

    /// One recompute-then-fetch cycle.
    ///
    /// Rows come back sorted by rank ascending; unranked rows sort last.
    pub async fn fetch(
        &self,
        tournament: &str,
        players: bool,
    ) -> Result<LeaderboardView, AppError> {
        let refresh = self.control.update_leaderboard().await?;
        info!(
            "leaderboard recomputed: {} player rounds, {} team rounds",
            refresh.updated_player_rounds, refresh.updated_team_rounds
        );

        let rows = if players {
            let mut rows = self.control.player_leaderboard(tournament).await?;
            sort_by_rank(&mut rows, |row| row.rank);
            LeaderboardRows::Players(rows)
        } else {
            let mut rows = self.control.team_leaderboard(tournament).await?;
            sort_by_rank(&mut rows, |row| row.rank);
            LeaderboardRows::Teams(rows)
        };

        Ok(LeaderboardView {
            tournament: tournament.to_string(),
            refresh,
            rows,
        })
    }
}
