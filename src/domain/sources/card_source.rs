//! Source trait for combined card records.

use crate::domain::entities::{HoleCardData, TeamCardData};
use crate::error::AppError;
use async_trait::async_trait;

/// Access to the tournament API's card endpoints.
///
/// The API assembles one combined record per card (entity fields plus
/// tournament context); the generators serialize that record into the QR
/// payload and lay out the page around it.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::TournamentApi`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Probes the API before a batch run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] when the API is unreachable.
    async fn health(&self) -> Result<(), AppError>;

    /// Fetches the combined record for one hole.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ApiStatus`] when the hole is unknown and
    /// [`AppError::ApiBody`] when the record does not parse; both skip the
    /// record within a batch.
    async fn hole_card(&self, course_name: &str, hole_number: i64)
    -> Result<HoleCardData, AppError>;

    /// Fetches the combined record for one team.
    ///
    /// # Errors
    ///
    /// Same classes as [`Self::hole_card`].
    async fn team_card(&self, team_number: i64) -> Result<TeamCardData, AppError>;
}
