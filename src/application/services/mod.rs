//! Batch and control services.

pub mod hole_card_service;
pub mod leaderboard_service;
pub mod scorecard_service;
pub mod simulation_service;
pub mod team_card_service;

pub use hole_card_service::{HoleCardRun, HoleCardService};
pub use leaderboard_service::{LeaderboardRows, LeaderboardService, LeaderboardView};
pub use scorecard_service::{ScorecardRun, ScorecardService};
pub use simulation_service::{SimulationOptions, SimulationReport, SimulationService};
pub use team_card_service::{TeamCardRun, TeamCardService};
