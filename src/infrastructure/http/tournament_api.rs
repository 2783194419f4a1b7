//! Client for the tournament service: card payloads, rounds, scores and
//! leaderboards.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::domain::entities::{HoleCardData, PlayerStanding, TeamCardData, TeamStanding};
use crate::domain::sources::{
    CardSource, ControlAck, LeaderboardRefresh, RoundClose, TournamentControl,
};
use crate::error::AppError;
use crate::infrastructure::http::HttpApi;

/// HTTP implementation of [`CardSource`] and [`TournamentControl`].
#[derive(Debug, Clone)]
pub struct TournamentApi {
    api: HttpApi,
}

/// Card endpoints answer with the payload the backend would print on a QR
/// code, serialized once more as a JSON string. The server-rendered QR
/// image in the same response is ignored; codes are re-encoded locally.
#[derive(Debug, Deserialize)]
struct CardEnvelope {
    encoded_data: String,
}

impl CardEnvelope {
    fn parse<T: DeserializeOwned>(self, api: &HttpApi, endpoint: &str) -> Result<T, AppError> {
        serde_json::from_str(&self.encoded_data).map_err(|e| {
            AppError::api_body(
                api.name(),
                format!("{}/{endpoint}", api.base()),
                format!("encoded_data did not parse: {e}"),
            )
        })
    }
}

#[derive(Debug, Serialize)]
struct HoleCardRequest<'a> {
    course_name: &'a str,
    hole_number: i64,
}

#[derive(Debug, Serialize)]
struct TeamCardRequest {
    team_number: i64,
}

#[derive(Debug, Serialize)]
struct TournamentRequest<'a> {
    tournament_name: &'a str,
}

#[derive(Debug, Serialize)]
struct TeamRoundRequest<'a> {
    tournament_name: &'a str,
    team_number: i64,
}

#[derive(Debug, Serialize)]
struct PlayerRoundRequest<'a> {
    tournament_name: &'a str,
    team_number: i64,
    player_number: i64,
}

#[derive(Debug, Serialize)]
struct EndPlayerRoundRequest<'a> {
    player_number: i64,
    tournament_name: &'a str,
}

#[derive(Debug, Serialize)]
struct EndTeamRoundRequest<'a> {
    team_number: i64,
    tournament_name: &'a str,
}

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    player_number: i64,
    course_name: &'a str,
    hole_number: i64,
    score: i64,
}

impl TournamentApi {
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `base` is not a usable URL.
    pub fn new(base: &str, timeout: Duration, health_timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            api: HttpApi::new("tournament", base, timeout, health_timeout)?,
        })
    }

    /// Builds the client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            &config.tournament_api_url,
            Duration::from_secs(config.api_timeout_secs),
            Duration::from_secs(config.health_timeout_secs),
        )
    }
}

#[async_trait]
impl CardSource for TournamentApi {
    async fn health(&self) -> Result<(), AppError> {
        self.api.health().await
    }

    async fn hole_card(
        &self,
        course_name: &str,
        hole_number: i64,
    ) -> Result<HoleCardData, AppError> {
        let envelope: CardEnvelope = self
            .api
            .post_json(
                &["generate-hole-card"],
                &HoleCardRequest {
                    course_name,
                    hole_number,
                },
            )
            .await?;
        envelope.parse(&self.api, "generate-hole-card")
    }

    async fn team_card(&self, team_number: i64) -> Result<TeamCardData, AppError> {
        let envelope: CardEnvelope = self
            .api
            .post_json(&["generate-team-card"], &TeamCardRequest { team_number })
            .await?;
        envelope.parse(&self.api, "generate-team-card")
    }
}

#[async_trait]
impl TournamentControl for TournamentApi {
    async fn health(&self) -> Result<(), AppError> {
        self.api.health().await
    }

    async fn start_tournament(&self, tournament_name: &str) -> Result<ControlAck, AppError> {
        self.api
            .post_json(&["start-tournament"], &TournamentRequest { tournament_name })
            .await
    }

    async fn end_tournament(&self, tournament_name: &str) -> Result<ControlAck, AppError> {
        self.api
            .post_json(&["end-tournament"], &TournamentRequest { tournament_name })
            .await
    }

    async fn activate_team_round(
        &self,
        tournament_name: &str,
        team_number: i64,
    ) -> Result<ControlAck, AppError> {
        self.api
            .post_json(
                &["activate-team-round"],
                &TeamRoundRequest {
                    tournament_name,
                    team_number,
                },
            )
            .await
    }

    async fn activate_player_round(
        &self,
        tournament_name: &str,
        team_number: i64,
        player_number: i64,
    ) -> Result<ControlAck, AppError> {
        self.api
            .post_json(
                &["activate-player-round"],
                &PlayerRoundRequest {
                    tournament_name,
                    team_number,
                    player_number,
                },
            )
            .await
    }

    async fn end_player_round(
        &self,
        player_number: i64,
        tournament_name: &str,
    ) -> Result<RoundClose, AppError> {
        self.api
            .post_json(
                &["end-player-round"],
                &EndPlayerRoundRequest {
                    player_number,
                    tournament_name,
                },
            )
            .await
    }

    async fn end_team_round(
        &self,
        team_number: i64,
        tournament_name: &str,
    ) -> Result<RoundClose, AppError> {
        self.api
            .post_json(
                &["end-team-round"],
                &EndTeamRoundRequest {
                    team_number,
                    tournament_name,
                },
            )
            .await
    }

    async fn record_score(
        &self,
        player_number: i64,
        course_name: &str,
        hole_number: i64,
        score: i64,
    ) -> Result<ControlAck, AppError> {
        self.api
            .post_json(
                &["record-score"],
                &ScoreRequest {
                    player_number,
                    course_name,
                    hole_number,
                    score,
                },
            )
            .await
    }

    async fn update_leaderboard(&self) -> Result<LeaderboardRefresh, AppError> {
        self.api
            .post_json(&["update-leaderboard"], &serde_json::json!({}))
            .await
    }

    async fn team_leaderboard(
        &self,
        tournament_name: &str,
    ) -> Result<Vec<TeamStanding>, AppError> {
        self.api
            .get_json(&["team-leaderboard", tournament_name])
            .await
    }

    async fn player_leaderboard(
        &self,
        tournament_name: &str,
    ) -> Result<Vec<PlayerStanding>, AppError> {
        self.api
            .get_json(&["player-leaderboard", tournament_name])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_nested_card_payload() {
        let envelope = CardEnvelope {
            encoded_data: r#"{"course_name":"Black Course","hole_number":3,"hole_name":"Windmill","hole_par":2}"#
                .to_string(),
        };
        let api = HttpApi::new(
            "tournament",
            "http://localhost:8002",
            Duration::from_secs(10),
            Duration::from_secs(5),
        )
        .unwrap();

        let card: HoleCardData = envelope.parse(&api, "generate-hole-card").unwrap();
        assert_eq!(card.course_name, "Black Course");
        assert_eq!(card.hole_number, 3);
        assert_eq!(card.hole_name.as_deref(), Some("Windmill"));
        assert_eq!(card.hole_par, Some(2));
    }

    #[test]
    fn envelope_rejects_garbage_payload() {
        let envelope = CardEnvelope {
            encoded_data: "not json".to_string(),
        };
        let api = HttpApi::new(
            "tournament",
            "http://localhost:8002",
            Duration::from_secs(10),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = envelope
            .parse::<HoleCardData>(&api, "generate-hole-card")
            .unwrap_err();
        assert!(!err.is_fatal());
    }
}
