//! Team and player records.

use serde::{Deserialize, Serialize};

use super::{RecordError, required_positive, required_string};

/// A validated team listing entry. Identity is the team number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub number: i64,
}

/// A team listing row as it arrives from the main API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRecord {
    pub name: Option<String>,
    pub number: Option<i64>,
}

impl TeamRecord {
    /// Validates the raw record into a [`Team`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the name is missing/blank or the number
    /// is missing or below 1.
    pub fn validate(self) -> Result<Team, RecordError> {
        Ok(Team {
            name: required_string("team", "name", self.name)?,
            number: required_positive("team", "number", self.number)?,
        })
    }
}

/// A validated roster player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub number: i64,
    /// Contact address for scorecard distribution; many rosters omit it.
    pub email: Option<String>,
}

/// A roster row as it arrives from the main API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRecord {
    pub name: Option<String>,
    pub number: Option<i64>,
    pub email: Option<String>,
}

impl PlayerRecord {
    /// Validates the raw record into a [`Player`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the name is missing/blank or the number
    /// is missing or below 1. A missing email is fine.
    pub fn validate(self) -> Result<Player, RecordError> {
        Ok(Player {
            name: required_string("player", "name", self.name)?,
            number: required_positive("player", "number", self.number)?,
            email: self.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_requires_name_and_number() {
        let team = TeamRecord {
            name: Some("The Sharks".to_string()),
            number: Some(7),
        }
        .validate()
        .unwrap();
        assert_eq!(team.number, 7);

        assert!(
            TeamRecord {
                name: Some("The Sharks".to_string()),
                number: None
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn player_email_is_optional() {
        let player = PlayerRecord {
            name: Some("Sam".to_string()),
            number: Some(12),
            email: None,
        }
        .validate()
        .unwrap();

        assert_eq!(player.name, "Sam");
        assert!(player.email.is_none());
    }
}
