//! Client for the entity service: courses, holes, teams and players.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::domain::entities::{CourseRecord, HoleRecord, PlayerRecord, TeamRecord};
use crate::domain::sources::{CourseSource, TeamSource};
use crate::error::AppError;
use crate::infrastructure::http::HttpApi;

/// HTTP implementation of [`CourseSource`] and [`TeamSource`].
///
/// Listings come back as raw records so a single malformed row cannot sink
/// the whole response; callers validate row by row.
#[derive(Debug, Clone)]
pub struct MainApi {
    api: HttpApi,
}

impl MainApi {
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `base` is not a usable URL.
    pub fn new(base: &str, timeout: Duration, health_timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            api: HttpApi::new("main", base, timeout, health_timeout)?,
        })
    }

    /// Builds the client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            &config.main_api_url,
            Duration::from_secs(config.api_timeout_secs),
            Duration::from_secs(config.health_timeout_secs),
        )
    }
}

#[async_trait]
impl CourseSource for MainApi {
    async fn health(&self) -> Result<(), AppError> {
        self.api.health().await
    }

    async fn courses(&self) -> Result<Vec<CourseRecord>, AppError> {
        self.api.get_json(&["courses"]).await
    }

    async fn holes(&self, course_name: &str) -> Result<Vec<HoleRecord>, AppError> {
        self.api
            .get_json(&["courses", course_name, "holes"])
            .await
    }
}

#[async_trait]
impl TeamSource for MainApi {
    async fn health(&self) -> Result<(), AppError> {
        self.api.health().await
    }

    async fn teams(&self) -> Result<Vec<TeamRecord>, AppError> {
        self.api.get_json(&["teams"]).await
    }

    async fn players(&self, team_number: i64) -> Result<Vec<PlayerRecord>, AppError> {
        self.api
            .get_json(&["teams", &team_number.to_string(), "players"])
            .await
    }
}
