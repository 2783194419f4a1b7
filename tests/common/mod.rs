#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use clubhouse::domain::entities::{
    CourseRecord, HoleCardData, HoleRecord, PlayerRecord, TeamCardData, TeamRecord,
};
use clubhouse::domain::sources::{CardSource, CourseSource, TeamSource};
use clubhouse::error::AppError;

/// Fixed batch timestamp so rerun tests compare bytes meaningfully.
pub fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
}

pub fn course(name: &str, par: i64) -> CourseRecord {
    CourseRecord {
        name: Some(name.to_string()),
        par: Some(par),
    }
}

pub fn hole(name: &str, number: i64, par: i64) -> HoleRecord {
    HoleRecord {
        name: Some(name.to_string()),
        number: Some(number),
        par: Some(par),
    }
}

pub fn team(name: &str, number: i64) -> TeamRecord {
    TeamRecord {
        name: Some(name.to_string()),
        number: Some(number),
    }
}

pub fn player(name: &str, number: i64, email: Option<&str>) -> PlayerRecord {
    PlayerRecord {
        name: Some(name.to_string()),
        number: Some(number),
        email: email.map(str::to_string),
    }
}

pub fn hole_card(course_name: &str, hole_number: i64) -> HoleCardData {
    HoleCardData {
        course_name: course_name.to_string(),
        course_par: Some(54),
        hole_name: Some(format!("Hole {hole_number}")),
        hole_number,
        hole_par: Some(3),
        location_name: Some("Pier 39".to_string()),
        tournaments: vec![],
    }
}

pub fn team_card(team_name: &str, team_number: i64) -> TeamCardData {
    TeamCardData {
        team_name: team_name.to_string(),
        team_number,
        players: vec![],
        tournaments: vec![],
    }
}

/// In-memory course listing behind the `CourseSource` trait.
///
/// `healthy: false` makes every call fail the way an unreachable API would,
/// so the zero-files-on-connectivity-failure behavior is testable offline.
pub struct StubCourses {
    pub courses: Vec<CourseRecord>,
    pub holes: HashMap<String, Vec<HoleRecord>>,
    pub healthy: bool,
}

impl StubCourses {
    pub fn new(courses: Vec<CourseRecord>) -> Self {
        Self {
            courses,
            holes: HashMap::new(),
            healthy: true,
        }
    }

    pub fn with_holes(mut self, course_name: &str, holes: Vec<HoleRecord>) -> Self {
        self.holes.insert(course_name.to_string(), holes);
        self
    }

    pub fn unreachable() -> Self {
        Self {
            courses: vec![],
            holes: HashMap::new(),
            healthy: false,
        }
    }

    fn down(&self) -> AppError {
        AppError::connectivity("main", "http://localhost:8000", "connection refused")
    }
}

#[async_trait]
impl CourseSource for StubCourses {
    async fn health(&self) -> Result<(), AppError> {
        if self.healthy { Ok(()) } else { Err(self.down()) }
    }

    async fn courses(&self) -> Result<Vec<CourseRecord>, AppError> {
        if !self.healthy {
            return Err(self.down());
        }
        Ok(self.courses.clone())
    }

    async fn holes(&self, course_name: &str) -> Result<Vec<HoleRecord>, AppError> {
        if !self.healthy {
            return Err(self.down());
        }
        self.holes.get(course_name).cloned().ok_or_else(|| {
            AppError::api_status("main", "GET", format!("/courses/{course_name}/holes"), 404)
        })
    }
}

/// In-memory team listing behind the `TeamSource` trait.
pub struct StubTeams {
    pub teams: Vec<TeamRecord>,
    pub players: HashMap<i64, Vec<PlayerRecord>>,
    pub healthy: bool,
}

impl StubTeams {
    pub fn new(teams: Vec<TeamRecord>) -> Self {
        Self {
            teams,
            players: HashMap::new(),
            healthy: true,
        }
    }

    pub fn with_players(mut self, team_number: i64, players: Vec<PlayerRecord>) -> Self {
        self.players.insert(team_number, players);
        self
    }

    fn down(&self) -> AppError {
        AppError::connectivity("main", "http://localhost:8000", "connection refused")
    }
}

#[async_trait]
impl TeamSource for StubTeams {
    async fn health(&self) -> Result<(), AppError> {
        if self.healthy { Ok(()) } else { Err(self.down()) }
    }

    async fn teams(&self) -> Result<Vec<TeamRecord>, AppError> {
        if !self.healthy {
            return Err(self.down());
        }
        Ok(self.teams.clone())
    }

    async fn players(&self, team_number: i64) -> Result<Vec<PlayerRecord>, AppError> {
        if !self.healthy {
            return Err(self.down());
        }
        Ok(self.players.get(&team_number).cloned().unwrap_or_default())
    }
}

/// In-memory card records behind the `CardSource` trait.
///
/// Cards not registered here come back as 404s, which a batch treats as a
/// per-record skip.
pub struct StubCards {
    pub hole_cards: HashMap<(String, i64), HoleCardData>,
    pub team_cards: HashMap<i64, TeamCardData>,
    pub healthy: bool,
}

impl StubCards {
    pub fn new() -> Self {
        Self {
            hole_cards: HashMap::new(),
            team_cards: HashMap::new(),
            healthy: true,
        }
    }

    pub fn with_hole_card(mut self, card: HoleCardData) -> Self {
        self.hole_cards
            .insert((card.course_name.clone(), card.hole_number), card);
        self
    }

    pub fn with_team_card(mut self, card: TeamCardData) -> Self {
        self.team_cards.insert(card.team_number, card);
        self
    }
}

#[async_trait]
impl CardSource for StubCards {
    async fn health(&self) -> Result<(), AppError> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::connectivity(
                "tournament",
                "http://localhost:8000/tournament",
                "connection refused",
            ))
        }
    }

    async fn hole_card(
        &self,
        course_name: &str,
        hole_number: i64,
    ) -> Result<HoleCardData, AppError> {
        self.hole_cards
            .get(&(course_name.to_string(), hole_number))
            .cloned()
            .ok_or_else(|| {
                AppError::api_status("tournament", "POST", "/generate-hole-card", 404)
            })
    }

    async fn team_card(&self, team_number: i64) -> Result<TeamCardData, AppError> {
        self.team_cards.get(&team_number).cloned().ok_or_else(|| {
            AppError::api_status("tournament", "POST", "/generate-team-card", 404)
        })
    }
}
