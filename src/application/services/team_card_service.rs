//! Team card batch generation.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::fs;
use tracing::{info, warn};

use crate::application::batch::BatchReport;
use crate::compose::{PageTemplate, team_card};
use crate::domain::entities::Team;
use crate::domain::sources::{CardSource, TeamSource};
use crate::error::AppError;
use crate::qr::{QrMatrix, QrPayload};

/// Options for one team card run.
#[derive(Debug, Clone)]
pub struct TeamCardRun {
    /// Team names to cover (case-insensitive); empty means every team.
    pub teams: Vec<String>,
    pub output_dir: PathBuf,
    pub template: PageTemplate,
    pub generated_at: DateTime<Utc>,
}

/// Drives the team listing through the composer into `team_card_*.pdf`
/// files, one per team.
pub struct TeamCardService<T, Q> {
    teams: Arc<T>,
    cards: Arc<Q>,
}

impl<T, Q> TeamCardService<T, Q>
where
    T: TeamSource,
    Q: CardSource,
{
    pub fn new(teams: Arc<T>, cards: Arc<Q>) -> Self {
        Self { teams, cards }
    }

    /// Team names available for selection.
    pub async fn available_teams(&self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::new();
        for record in self.teams.teams().await? {
            match record.validate() {
                Ok(team) => names.push(team.name),
                Err(e) => warn!("skipping team listing entry: {e}"),
            }
        }
        Ok(names)
    }

    /// Runs one batch. Fatal failures abort with `Err`; per-record
    /// failures are tallied as skips in the report.
    pub async fn run(&self, run: &TeamCardRun) -> Result<BatchReport, AppError> {
        self.teams.health().await?;
        self.cards.health().await?;

        fs::create_dir_all(&run.output_dir)
            .await
            .map_err(|e| AppError::filesystem(&run.output_dir, e))?;

        let mut report = BatchReport::default();
        let stamp = run
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut listing = Vec::new();
        for record in self.teams.teams().await? {
            match record.validate() {
                Ok(team) => listing.push(team),
                Err(e) => {
                    warn!("skipping team listing entry: {e}");
                    report.record_skip();
                }
            }
        }

        let selected: Vec<Team> = if run.teams.is_empty() {
            listing
        } else {
            let mut selected = Vec::new();
            for wanted in &run.teams {
                match listing
                    .iter()
                    .find(|team| team.name.to_lowercase() == wanted.to_lowercase())
                {
                    Some(team) => selected.push(team.clone()),
                    None => {
                        warn!("team '{wanted}' not found in the team listing");
                        report.record_skip();
                    }
                }
            }
            selected
        };

        for team in &selected {
            info!("processing team {} (#{})", team.name, team.number);
            match self.generate_one(team, run, &stamp).await {
                Ok(path) => {
                    info!("created {}", path.display());
                    report.record_success(path);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("skipping team {}: {e}", team.name);
                    report.record_skip();
                }
            }
        }

        if report.total() == 0 {
            return Err(AppError::empty("no teams matched the selection"));
        }

        info!(
            "team card run finished: {} created, {} skipped",
            report.succeeded, report.skipped
        );
        Ok(report)
    }

    async fn generate_one(
        &self,
        team: &Team,
        run: &TeamCardRun,
        stamp: &str,
    ) -> Result<PathBuf, AppError> {
        let mut card = self.cards.team_card(team.number).await?;
        // Listing identity wins over whatever the card record carries.
        card.team_name = team.name.clone();
        card.team_number = team.number;

        let payload = QrPayload::team_card(&card, stamp).to_json()?;
        let matrix = QrMatrix::encode(&payload)?;
        let bytes = team_card::render(&card, &matrix, run.template, run.generated_at)?;

        let path = run.output_dir.join(card.file_name());
        fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::filesystem(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::entities::{RosterEntry, TeamCardData, TeamRecord};
    use crate::domain::sources::{MockCardSource, MockTeamSource};

    fn run_options(dir: &std::path::Path) -> TeamCardRun {
        TeamCardRun {
            teams: Vec::new(),
            output_dir: dir.to_path_buf(),
            template: PageTemplate::Card,
            generated_at: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    fn team_record(name: Option<&str>, number: i64) -> TeamRecord {
        TeamRecord {
            name: name.map(str::to_string),
            number: Some(number),
        }
    }

    fn card_for(number: i64) -> TeamCardData {
        TeamCardData {
            team_name: format!("Team {number}"),
            team_number: number,
            players: vec![RosterEntry {
                name: Some("Sam".to_string()),
                number: Some(number * 10),
                email: None,
            }],
            tournaments: vec![],
        }
    }

    #[tokio::test]
    async fn generates_one_file_per_valid_team() {
        let dir = tempfile::tempdir().unwrap();

        let mut teams = MockTeamSource::new();
        teams.expect_health().returning(|| Ok(()));
        teams.expect_teams().returning(|| {
            Ok(vec![
                team_record(Some("The Sharks"), 7),
                team_record(None, 8),
                team_record(Some("Lightning Bolts"), 9),
            ])
        });

        let mut cards = MockCardSource::new();
        cards.expect_health().returning(|| Ok(()));
        cards.expect_team_card().returning(|n| Ok(card_for(n)));

        let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
        let report = service.run(&run_options(dir.path())).await.unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.skipped, 1);
        assert!(dir.path().join("team_card_The Sharks_#007.pdf").exists());
        assert!(
            dir.path()
                .join("team_card_Lightning Bolts_#009.pdf")
                .exists()
        );
    }

    #[tokio::test]
    async fn selection_matches_names_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();

        let mut teams = MockTeamSource::new();
        teams.expect_health().returning(|| Ok(()));
        teams
            .expect_teams()
            .returning(|| Ok(vec![team_record(Some("The Sharks"), 7)]));

        let mut cards = MockCardSource::new();
        cards.expect_health().returning(|| Ok(()));
        cards.expect_team_card().returning(|n| Ok(card_for(n)));

        let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
        let mut options = run_options(dir.path());
        options.teams = vec!["the sharks".to_string(), "Nobody".to_string()];
        let report = service.run(&options).await.unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.skipped, 1);
    }

    #[tokio::test]
    async fn card_endpoint_failure_skips_that_team() {
        let dir = tempfile::tempdir().unwrap();

        let mut teams = MockTeamSource::new();
        teams.expect_health().returning(|| Ok(()));
        teams.expect_teams().returning(|| {
            Ok(vec![
                team_record(Some("The Sharks"), 7),
                team_record(Some("Lightning Bolts"), 9),
            ])
        });

        let mut cards = MockCardSource::new();
        cards.expect_health().returning(|| Ok(()));
        cards.expect_team_card().returning(|n| {
            if n == 7 {
                Err(AppError::api_status(
                    "tournament",
                    "POST",
                    "http://localhost:8000/tournament/generate-team-card",
                    500,
                ))
            } else {
                Ok(card_for(n))
            }
        });

        let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
        let report = service.run(&run_options(dir.path())).await.unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.skipped, 1);
    }
}
