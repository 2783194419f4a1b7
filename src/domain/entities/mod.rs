//! Typed records for the tournament data model.
//!
//! Every record arrives over HTTP and may be missing fields, so each listing
//! entity comes in two forms: a raw `*Record` with optional fields that
//! always deserializes, and the validated entity produced by `validate()`.
//! Validation failures carry the entity and field name so a batch run can
//! log exactly what was skipped.
//!
//! # Entity Types
//!
//! - [`Course`] / [`Hole`] - Course listings and their holes
//! - [`Team`] / [`Player`] - Team listings and rosters
//! - [`HoleCardData`] / [`TeamCardData`] - Combined records behind a card's QR payload
//! - [`TeamStanding`] / [`PlayerStanding`] - Leaderboard rows

pub mod card;
pub mod course;
pub mod leaderboard;
pub mod team;

pub use card::{HoleCardData, RosterEntry, TeamCardData, TeamRoundTag, TournamentTag};
pub use course::{Course, CourseRecord, Hole, HoleRecord};
pub use leaderboard::{PlayerStanding, TeamStanding, sort_by_rank};
pub use team::{Player, PlayerRecord, Team, TeamRecord};

use thiserror::Error;

/// A record that cannot be used because a required field is missing or bad.
///
/// These are per-record failures: the batch logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{entity} record is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} record has invalid `{field}`: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Unwraps a required string field, rejecting empty and whitespace-only values.
pub(crate) fn required_string(
    entity: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, RecordError> {
    let value = value.ok_or(RecordError::MissingField { entity, field })?;

    if value.trim().is_empty() {
        return Err(RecordError::InvalidField {
            entity,
            field,
            reason: "empty".to_string(),
        });
    }

    Ok(value)
}

/// Unwraps a required integer field that must be at least 1.
pub(crate) fn required_positive(
    entity: &'static str,
    field: &'static str,
    value: Option<i64>,
) -> Result<i64, RecordError> {
    let value = value.ok_or(RecordError::MissingField { entity, field })?;

    if value < 1 {
        return Err(RecordError::InvalidField {
            entity,
            field,
            reason: format!("must be at least 1, got {}", value),
        });
    }

    Ok(value)
}
