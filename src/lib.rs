//! # Clubhouse
//!
//! Admin toolset for running minigolf tournaments: batch generators for
//! printable hole cards, team cards and blank scorecards (QR codes
//! included), plus leaderboard display, tournament control verbs and a
//! full-field simulator. Everything talks to the two tournament HTTP APIs;
//! the toolset itself owns no data.
//!
//! ## Architecture
//!
//! This crate follows a layered layout with clear separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, record validation and source traits
//! - **Application Layer** ([`application`]) - Batch drivers and control services
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP clients for the two APIs
//! - **Composition** ([`compose`], [`qr`]) - PDF page drawing and QR payloads
//! - **Delivery** ([`email`]) - Scorecard distribution over SMTP
//!
//! ## Features
//!
//! - Deterministic print-ready PDFs: reruns on unchanged data are byte-identical
//! - QR payloads that parse back into the records they were built from
//! - Per-record skip accounting so one bad record never sinks a batch
//! - Optional scorecard emailing to team rosters
//! - Concurrent tournament simulation for exercising a fresh deployment
//!
//! ## Quick Start
//!
//! ```bash
//! # Point the tool at the APIs
//! export MAIN_API_URL="http://localhost:8000"
//! export TOURNAMENT_API_URL="http://localhost:8000/tournament"
//!
//! # Generate every hole card
//! cargo run -- hole-cards
//!
//! # Watch the team leaderboard
//! cargo run -- leaderboard "Summer Open" --watch 30
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See the [`config`] module for available options.

pub mod application;
pub mod compose;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod qr;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::BatchReport;
    pub use crate::application::services::{
        HoleCardService, LeaderboardService, ScorecardService, SimulationService, TeamCardService,
    };
    pub use crate::domain::entities::{Course, Hole, Player, Team};
    pub use crate::error::AppError;
}
