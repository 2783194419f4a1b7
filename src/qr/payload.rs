//! The JSON document inside a card's QR code.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{HoleCardData, TeamCardData};

/// Scannable card payload, tagged so readers can tell the two card kinds
/// apart by the `type` field.
///
/// `generated_at` is the batch timestamp in RFC 3339. All cards of one run
/// share it; pinning it makes a rerun reproduce every file byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QrPayload {
    HoleCard {
        #[serde(flatten)]
        card: HoleCardData,
        generated_at: String,
    },
    TeamCard {
        #[serde(flatten)]
        card: TeamCardData,
        generated_at: String,
    },
}

impl QrPayload {
    pub fn hole_card(card: &HoleCardData, generated_at: &str) -> Self {
        Self::HoleCard {
            card: card.clone(),
            generated_at: generated_at.to_string(),
        }
    }

    pub fn team_card(card: &TeamCardData, generated_at: &str) -> Self {
        Self::TeamCard {
            card: card.clone(),
            generated_at: generated_at.to_string(),
        }
    }

    /// Serializes the payload to the exact string that gets encoded.
    ///
    /// Field order follows the type declarations, so the same payload always
    /// produces the same string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
