//! Data source trait definitions for the domain layer.
//!
//! The toolset reads everything through the two HTTP APIs; these traits
//! abstract that access so batch logic can be tested against mocks and
//! stubs without a running backend.
//!
//! # Architecture
//!
//! - Traits define the contract for data access
//! - Implementations live in `crate::infrastructure::http`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Sources
//!
//! - [`CourseSource`] - Course listings and per-course holes (main API)
//! - [`TeamSource`] - Team listings and rosters (main API)
//! - [`CardSource`] - Combined card records for QR generation (tournament API)
//! - [`TournamentControl`] - Round lifecycle, scoring and leaderboards (tournament API)

pub mod card_source;
pub mod course_source;
pub mod team_source;
pub mod tournament_control;

pub use card_source::CardSource;
pub use course_source::CourseSource;
pub use team_source::TeamSource;
pub use tournament_control::{ControlAck, LeaderboardRefresh, RoundClose, TournamentControl};

#[cfg(test)]
pub use card_source::MockCardSource;
#[cfg(test)]
pub use course_source::MockCourseSource;
#[cfg(test)]
pub use team_source::MockTeamSource;
#[cfg(test)]
pub use tournament_control::MockTournamentControl;
