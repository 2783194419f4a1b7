//! Combined card records returned by the tournament API.
//!
//! These are the records behind a card's QR payload: the tournament API
//! assembles them from the graph (course, hole, location, tournaments,
//! roster, standings) and the generators turn them into printed cards.
//! Identity fields are required; everything else tolerates gaps because the
//! card layouts have placeholders for them.

use serde::{Deserialize, Serialize};

use super::Hole;
use crate::utils::slug::sanitize_component;

/// Everything known about one hole for card generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleCardData {
    pub course_name: String,
    #[serde(default)]
    pub course_par: Option<i64>,
    #[serde(default)]
    pub hole_name: Option<String>,
    pub hole_number: i64,
    #[serde(default)]
    pub hole_par: Option<i64>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub tournaments: Vec<TournamentTag>,
}

impl HoleCardData {
    /// Fills gaps from the course listing entry for the same hole.
    ///
    /// The listing and the card endpoint describe the same hole; when the
    /// combined record is missing a name or par, the listing value wins over
    /// a placeholder.
    pub fn fill_from_listing(&mut self, listing: &Hole) {
        if self.hole_name.is_none() {
            self.hole_name = Some(listing.name.clone());
        }
        if self.hole_par.is_none() {
            self.hole_par = Some(listing.par);
        }
    }

    /// Hole name with the last-resort placeholder.
    pub fn display_name(&self) -> String {
        self.hole_name
            .clone()
            .unwrap_or_else(|| format!("Hole {}", self.hole_number))
    }

    /// Par with the conventional minigolf default when nothing is on file.
    pub fn par_or_default(&self) -> i64 {
        self.hole_par.unwrap_or(4)
    }

    /// Deterministic output filename: `hole_card_{course}_hole_{NN}.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "hole_card_{}_hole_{:02}.pdf",
            sanitize_component(&self.course_name),
            self.hole_number
        )
    }
}

/// Tournament membership tag carried on a hole card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentTag {
    pub tournament_name: Option<String>,
    pub tournament_active: Option<bool>,
}

/// Everything known about one team for card generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCardData {
    pub team_name: String,
    pub team_number: i64,
    #[serde(default)]
    pub players: Vec<RosterEntry>,
    #[serde(default)]
    pub tournaments: Vec<TeamRoundTag>,
}

impl TeamCardData {
    /// Deterministic output filename: `team_card_{name}_#{NNN}.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "team_card_{}_#{:03}.pdf",
            sanitize_component(&self.team_name),
            self.team_number
        )
    }
}

/// One roster line on a team card. Rendered as-is, gaps get placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: Option<String>,
    pub number: Option<i64>,
    pub email: Option<String>,
}

impl RosterEntry {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Player")
    }

    pub fn display_number(&self) -> String {
        self.number
            .map_or_else(|| "N/A".to_string(), |n| n.to_string())
    }
}

/// Standing of a team within one tournament, carried on a team card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRoundTag {
    pub tournament_name: Option<String>,
    pub team_round_active: Option<bool>,
    pub total: Option<i64>,
    pub average: Option<f64>,
    pub rank: Option<i64>,
}

impl TeamRoundTag {
    pub fn display_name(&self) -> &str {
        self.tournament_name.as_deref().unwrap_or("Unknown Tournament")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole_data() -> HoleCardData {
        HoleCardData {
            course_name: "Black Course".to_string(),
            course_par: Some(54),
            hole_name: Some("Windmill".to_string()),
            hole_number: 3,
            hole_par: Some(4),
            location_name: Some("Pier 39".to_string()),
            tournaments: vec![],
        }
    }

    #[test]
    fn hole_file_name_is_zero_padded_and_sanitized() {
        let mut data = hole_data();
        assert_eq!(data.file_name(), "hole_card_Black Course_hole_03.pdf");

        data.course_name = "Capt. Nemo's!".to_string();
        data.hole_number = 12;
        assert_eq!(data.file_name(), "hole_card_Capt Nemos_hole_12.pdf");
    }

    #[test]
    fn listing_fills_missing_name_and_par() {
        let mut data = hole_data();
        data.hole_name = None;
        data.hole_par = None;

        let listing = Hole {
            name: "Loop".to_string(),
            number: 3,
            par: 2,
        };
        data.fill_from_listing(&listing);

        assert_eq!(data.display_name(), "Loop");
        assert_eq!(data.par_or_default(), 2);
    }

    #[test]
    fn display_fallbacks_without_listing() {
        let mut data = hole_data();
        data.hole_name = None;
        data.hole_par = None;

        assert_eq!(data.display_name(), "Hole 3");
        assert_eq!(data.par_or_default(), 4);
    }

    #[test]
    fn team_file_name_pads_number_to_three() {
        let data = TeamCardData {
            team_name: "The Sharks".to_string(),
            team_number: 7,
            players: vec![],
            tournaments: vec![],
        };
        assert_eq!(data.file_name(), "team_card_The Sharks_#007.pdf");
    }

    #[test]
    fn card_data_parses_with_minimal_fields() {
        let data: TeamCardData =
            serde_json::from_str(r#"{"team_name":"Solo","team_number":1}"#).unwrap();
        assert!(data.players.is_empty());
        assert!(data.tournaments.is_empty());

        let entry = RosterEntry::default();
        assert_eq!(entry.display_name(), "Unknown Player");
        assert_eq!(entry.display_number(), "N/A");
    }
}
