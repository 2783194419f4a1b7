//! Source trait for team listings and rosters.

use crate::domain::entities::{PlayerRecord, TeamRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to teams and their player rosters.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::MainApi`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamSource: Send + Sync {
    /// Probes the API before a batch run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] when the API is unreachable.
    async fn health(&self) -> Result<(), AppError>;

    /// Lists all teams.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] on transport failures and
    /// [`AppError::ApiStatus`] on non-success responses.
    async fn teams(&self) -> Result<Vec<TeamRecord>, AppError>;

    /// Lists one team's roster, ordered by player name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ApiStatus`] when the team does not exist.
    async fn players(&self, team_number: i64) -> Result<Vec<PlayerRecord>, AppError>;
}
