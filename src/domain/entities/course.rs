//! Course and hole records.

use serde::{Deserialize, Serialize};

use super::{RecordError, required_positive, required_string};

/// A validated course listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    /// Total par for the course. Stays `None` when the listing omits it;
    /// only the scorecard header uses it and it prints a placeholder then.
    pub par: Option<i64>,
}

/// A course listing row as it arrives from the main API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseRecord {
    pub name: Option<String>,
    pub par: Option<i64>,
}

impl CourseRecord {
    /// Validates the raw record into a [`Course`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the name is missing or blank.
    pub fn validate(self) -> Result<Course, RecordError> {
        Ok(Course {
            name: required_string("course", "name", self.name)?,
            par: self.par,
        })
    }
}

/// A validated hole within a course.
///
/// Identity is the pair of course name and hole number; the course name
/// travels alongside because the holes listing is already per-course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub name: String,
    pub number: i64,
    pub par: i64,
}

/// A hole listing row as it arrives from the main API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoleRecord {
    pub name: Option<String>,
    pub number: Option<i64>,
    pub par: Option<i64>,
}

impl HoleRecord {
    /// Validates the raw record into a [`Hole`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the name is missing/blank or when the
    /// number or par is missing or below 1.
    pub fn validate(self) -> Result<Hole, RecordError> {
        Ok(Hole {
            name: required_string("hole", "name", self.name)?,
            number: required_positive("hole", "number", self.number)?,
            par: required_positive("hole", "par", self.par)?,
        })
    }
}
