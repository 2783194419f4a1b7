//! Source trait for course and hole listings.

use crate::domain::entities::{CourseRecord, HoleRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to courses and their holes.
///
/// Listings return raw records so that one malformed element skips a single
/// card instead of failing the whole listing.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::MainApi`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Probes the API before a batch run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] when the API is unreachable; the
    /// caller treats that as fatal.
    async fn health(&self) -> Result<(), AppError>;

    /// Lists all courses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] on transport failures and
    /// [`AppError::ApiStatus`] on non-success responses.
    async fn courses(&self) -> Result<Vec<CourseRecord>, AppError>;

    /// Lists the holes of one course, ordered by hole number.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ApiStatus`] when the course does not exist.
    async fn holes(&self, course_name: &str) -> Result<Vec<HoleRecord>, AppError>;
}
