//! Full-field tournament simulation against live APIs.
//!
//! Drives the same control endpoints a real event would: each simulated
//! team runs as its own task, activating rounds, posting normally
//! distributed scores hole by hole and closing out when done. Useful for
//! exercising a fresh deployment or feeding the leaderboard demo data.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{error, info, warn};

use crate::domain::entities::Player;
use crate::domain::sources::{TeamSource, TournamentControl};
use crate::error::AppError;

const HOLE_COUNT: i64 = 18;
const SCORE_MEAN: f64 = 3.0;
const SCORE_STDDEV: f64 = 1.0;
const NO_SHOW_RATE: f64 = 0.01;
const STAND_IN_COUNT: i64 = 5;

/// Parameters of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub tournament: String,
    /// Number of teams to send onto the courses, numbered from 1.
    pub teams: i64,
    /// Skip the realistic pacing delays.
    pub quick: bool,
    /// Fixed seed for reproducible scores; each team derives its own.
    pub seed: Option<u64>,
}

/// How the field fared once every team task has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub completed: usize,
    pub failed: usize,
}

/// Runs a whole tournament field, one concurrent task per team.
pub struct SimulationService<T, K> {
    teams: Arc<T>,
    control: Arc<K>,
}

impl<T, K> SimulationService<T, K>
where
    T: TeamSource + 'static,
    K: TournamentControl + 'static,
{
    pub fn new(teams: Arc<T>, control: Arc<K>) -> Self {
        Self { teams, control }
    }

    /// Starts the tournament and plays every team's round to completion.
    ///
    /// A team that fails mid-round is counted in the report without
    /// stopping the rest of the field. The tournament is left running so
    /// the leaderboard can still be inspected afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error only when the tournament itself cannot be started
    /// or the score distribution parameters are rejected.
    pub async fn run(&self, options: &SimulationOptions) -> Result<SimulationReport, AppError> {
        let ack = self.control.start_tournament(&options.tournament).await?;
        info!("tournament '{}' started: {}", options.tournament, ack.message);

        let normal = Normal::new(SCORE_MEAN, SCORE_STDDEV)
            .map_err(|e| AppError::config(format!("score distribution: {e}")))?;

        let mut handles = Vec::with_capacity(options.teams as usize);
        for team_number in 1..=options.teams {
            let rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(team_number as u64)),
                None => StdRng::from_os_rng(),
            };
            let runner = TeamRunner {
                teams: Arc::clone(&self.teams),
                control: Arc::clone(&self.control),
                tournament: options.tournament.clone(),
                team_number,
                course: course_for(team_number),
                starting_hole: team_number / 2 + 1,
                quick: options.quick,
                rng,
                normal,
            };
            handles.push(tokio::spawn(runner.play_round()));
        }

        let mut report = SimulationReport::default();
        for (index, handle) in handles.into_iter().enumerate() {
            let team_number = index as i64 + 1;
            match handle.await {
                Ok(Ok(())) => report.completed += 1,
                Ok(Err(e)) => {
                    error!("team {team_number} abandoned its round: {e}");
                    report.failed += 1;
                }
                Err(e) => {
                    error!("team {team_number} task panicked: {e}");
                    report.failed += 1;
                }
            }
        }

        info!(
            "simulation of '{}' finished: {} teams completed, {} failed",
            options.tournament, report.completed, report.failed
        );
        Ok(report)
    }
}

/// Alternate teams between the two courses, shotgun-starting halfway apart.
fn course_for(team_number: i64) -> &'static str {
    if team_number % 2 == 0 {
        "Red Course"
    } else {
        "Black Course"
    }
}

fn hole_sequence(starting_hole: i64) -> impl Iterator<Item = i64> {
    (0..HOLE_COUNT).map(move |i| (starting_hole - 1 + i) % HOLE_COUNT + 1)
}

/// One team's round, owned by its spawned task.
struct TeamRunner<T, K> {
    teams: Arc<T>,
    control: Arc<K>,
    tournament: String,
    team_number: i64,
    course: &'static str,
    starting_hole: i64,
    quick: bool,
    rng: StdRng,
    normal: Normal<f64>,
}

impl<T, K> TeamRunner<T, K>
where
    T: TeamSource,
    K: TournamentControl,
{
    async fn play_round(mut self) -> Result<(), AppError> {
        // Stagger the field so activations do not land in one burst.
        self.pace(1.0, 3.0).await;

        let mut players = self.roster().await;
        self.cull_no_shows(&mut players);

        self.control
            .activate_team_round(&self.tournament, self.team_number)
            .await?;
        for player in &players {
            self.control
                .activate_player_round(&self.tournament, self.team_number, player.number)
                .await?;
        }
        info!(
            "team {} starting on {} at hole {} with {} players",
            self.team_number,
            self.course,
            self.starting_hole,
            players.len()
        );

        for hole_number in hole_sequence(self.starting_hole) {
            let scores: Vec<(i64, i64)> = players
                .iter()
                .map(|player| (player.number, self.swing()))
                .collect();
            self.pace(5.0, 15.0).await;
            for (player_number, score) in scores {
                self.control
                    .record_score(player_number, self.course, hole_number, score)
                    .await?;
            }
        }

        for player in &players {
            self.pace(3.0, 5.0).await;
            let close = self
                .control
                .end_player_round(player.number, &self.tournament)
                .await?;
            info!(
                "player {} ({}) finished with {} over {} holes",
                player.number, player.name, close.total, close.holes_played
            );
        }

        let close = self
            .control
            .end_team_round(self.team_number, &self.tournament)
            .await?;
        info!(
            "team {} finished: total {}, average {:.2}",
            self.team_number, close.total, close.average
        );
        Ok(())
    }

    /// Fetches the real roster, falling back to stand-ins when the team
    /// has none on file or the lookup fails.
    async fn roster(&mut self) -> Vec<Player> {
        let records = match self.teams.players(self.team_number).await {
            Ok(records) => records,
            Err(e) => {
                warn!("team {} roster unavailable ({e}), using stand-ins", self.team_number);
                Vec::new()
            }
        };

        let players: Vec<Player> = records
            .into_iter()
            .filter_map(|record| record.validate().ok())
            .collect();
        if players.is_empty() {
            return self.stand_ins();
        }
        players
    }

    fn stand_ins(&self) -> Vec<Player> {
        (0..STAND_IN_COUNT)
            .map(|i| {
                let number = (self.team_number - 1) * STAND_IN_COUNT + i + 1;
                Player {
                    name: format!("Player {number}"),
                    number,
                    email: None,
                }
            })
            .collect()
    }

    /// Each player has a small chance of not showing up; a team always
    /// keeps at least one so the round stays playable.
    fn cull_no_shows(&mut self, players: &mut Vec<Player>) {
        let first = players.first().cloned();
        players.retain(|_| self.rng.random::<f64>() > NO_SHOW_RATE);
        if players.is_empty()
            && let Some(first) = first
        {
            warn!(
                "team {} lost its whole roster to no-shows, keeping one player",
                self.team_number
            );
            players.push(first);
        }
    }

    fn swing(&mut self) -> i64 {
        let raw: f64 = self.normal.sample(&mut self.rng);
        (raw.round() as i64).clamp(1, 6)
    }

    async fn pace(&mut self, min_secs: f64, max_secs: f64) {
        if self.quick {
            return;
        }
        let secs = self.rng.random_range(min_secs..max_secs);
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sources::{ControlAck, MockTeamSource, MockTournamentControl, RoundClose};

    fn options(teams: i64) -> SimulationOptions {
        SimulationOptions {
            tournament: "Summer Open".to_string(),
            teams,
            quick: true,
            seed: Some(42),
        }
    }

    fn permissive_control() -> MockTournamentControl {
        let mut control = MockTournamentControl::new();
        control
            .expect_start_tournament()
            .returning(|_| Ok(ControlAck::default()));
        control
            .expect_activate_team_round()
            .returning(|_, _| Ok(ControlAck::default()));
        control
            .expect_activate_player_round()
            .returning(|_, _, _| Ok(ControlAck::default()));
        control
            .expect_record_score()
            .returning(|_, _, _, _| Ok(ControlAck::default()));
        control
            .expect_end_player_round()
            .returning(|_, _| Ok(RoundClose::default()));
        control
            .expect_end_team_round()
            .returning(|_, _| Ok(RoundClose::default()));
        control
    }

    #[tokio::test]
    async fn every_team_plays_to_completion() {
        let mut teams = MockTeamSource::new();
        teams.expect_players().returning(|_| Ok(vec![]));

        let service = SimulationService::new(Arc::new(teams), Arc::new(permissive_control()));
        let report = service.run(&options(2)).await.unwrap();

        assert_eq!(
            report,
            SimulationReport {
                completed: 2,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn failed_activation_sinks_the_team_but_not_the_run() {
        let mut teams = MockTeamSource::new();
        teams.expect_players().returning(|_| Ok(vec![]));

        let mut control = MockTournamentControl::new();
        control
            .expect_start_tournament()
            .returning(|_| Ok(ControlAck::default()));
        control.expect_activate_team_round().returning(|_, _| {
            Err(AppError::api_status(
                "tournament",
                "POST",
                "http://localhost:8000/tournament/activate-team-round",
                409,
            ))
        });

        let service = SimulationService::new(Arc::new(teams), Arc::new(control));
        let report = service.run(&options(2)).await.unwrap();

        assert_eq!(
            report,
            SimulationReport {
                completed: 0,
                failed: 2
            }
        );
    }

    #[tokio::test]
    async fn unstartable_tournament_aborts_the_run() {
        let teams = MockTeamSource::new();
        let mut control = MockTournamentControl::new();
        control.expect_start_tournament().returning(|_| {
            Err(AppError::connectivity(
                "tournament",
                "http://localhost:8000/tournament",
                "connection refused",
            ))
        });

        let service = SimulationService::new(Arc::new(teams), Arc::new(control));
        let result = service.run(&options(1)).await;

        assert!(matches!(result, Err(AppError::Connectivity { .. })));
    }

    #[test]
    fn starting_holes_wrap_around_the_course() {
        let holes: Vec<i64> = hole_sequence(10).collect();
        assert_eq!(holes.len(), 18);
        assert_eq!(holes[0], 10);
        assert_eq!(holes[8], 18);
        assert_eq!(holes[9], 1);
        assert_eq!(holes[17], 9);
    }

    #[test]
    fn courses_alternate_by_team_number() {
        assert_eq!(course_for(1), "Black Course");
        assert_eq!(course_for(2), "Red Course");
        assert_eq!(course_for(3), "Black Course");
    }
}
