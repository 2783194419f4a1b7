//! Leaderboard rows as computed by the tournament API.

use serde::{Deserialize, Serialize};

/// One team's standing in a tournament leaderboard.
///
/// Numeric fields default to zero when the recompute has not touched the
/// round yet; rows are re-sorted by [`sort_by_rank`] before display since
/// the API does not guarantee an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_name: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub holes_played: i64,
}

/// One player's standing in a tournament leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player_name: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub holes_played: i64,
}

/// Sorts standings by rank ascending, unranked (0) rows last.
pub fn sort_by_rank<T, F: Fn(&T) -> i64>(rows: &mut [T], rank_of: F) {
    rows.sort_by_key(|row| {
        let rank = rank_of(row);
        if rank < 1 { i64::MAX } else { rank }
    });
}
