//! PDF composition for cards and scorecards.
//!
//! The generators hand a validated record plus an encoded QR matrix to one
//! of the renderers here and get finished PDF bytes back. All geometry is
//! done in inches from the bottom-left corner; [`Canvas`] owns the
//! conversion to PDF units.

pub mod canvas;
pub mod hole_card;
pub mod metrics;
pub mod palette;
pub mod scorecard;
pub mod team_card;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use canvas::Canvas;
pub use metrics::Face;
pub use palette::Tint;

/// Failures while assembling a PDF document.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The PDF backend refused an operation.
    #[error("PDF backend error: {0}")]
    Pdf(String),

    /// The batch timestamp cannot be represented in document metadata.
    #[error("document timestamp out of range: {0}")]
    Timestamp(String),
}

/// Page geometry for generated cards.
///
/// `Card` is the portrait 5x7" display card that goes on a stand at the
/// hole or gets handed to the team. `Compact` is the landscape half-letter
/// sheet the front desk prints in a hurry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageTemplate {
    #[default]
    Card,
    Compact,
}

impl PageTemplate {
    /// Page size in inches, width before height.
    pub fn size_in(self) -> (f32, f32) {
        match self {
            Self::Card => (5.0, 7.0),
            Self::Compact => (8.5, 5.5),
        }
    }
}

impl FromStr for PageTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "compact" => Ok(Self::Compact),
            other => Err(format!(
                "unknown page template '{other}', expected 'card' or 'compact'"
            )),
        }
    }
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => f.write_str("card"),
            Self::Compact => f.write_str("compact"),
        }
    }
}
