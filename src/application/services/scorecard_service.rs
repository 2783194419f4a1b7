//! Scorecard batch generation and distribution.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{info, warn};
use validator::ValidateEmail;

use crate::application::batch::BatchReport;
use crate::compose::scorecard;
use crate::domain::entities::{Course, Hole, Team};
use crate::domain::sources::{CourseSource, TeamSource};
use crate::email::Mailer;
use crate::error::AppError;
use crate::utils::slug::scorecard_file_name;

/// Options for one scorecard run.
#[derive(Debug, Clone)]
pub struct ScorecardRun {
    /// Course the scorecards are for.
    pub course: String,
    /// Team names to cover (case-insensitive); empty means every team.
    pub teams: Vec<String>,
    pub output_dir: PathBuf,
    /// Send each card to the team's registered addresses.
    pub email: bool,
    /// Route every card to this one address instead of the rosters.
    pub to_override: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// What happened to one team's email.
enum EmailOutcome {
    Sent,
    Failed,
    NoRecipients,
}

/// Produces one blank scorecard per team for a course, optionally mailing
/// each file to the team.
///
/// The file on disk is the durable output; mail is best-effort and a send
/// failure never aborts the batch.
pub struct ScorecardService<C, T> {
    courses: Arc<C>,
    teams: Arc<T>,
    mailer: Option<Mailer>,
}

impl<C, T> ScorecardService<C, T>
where
    C: CourseSource,
    T: TeamSource,
{
    pub fn new(courses: Arc<C>, teams: Arc<T>, mailer: Option<Mailer>) -> Self {
        Self {
            courses,
            teams,
            mailer,
        }
    }

    /// Runs one batch. Fatal failures abort with `Err`; per-record
    /// failures are tallied as skips in the report.
    pub async fn run(&self, run: &ScorecardRun) -> Result<BatchReport, AppError> {
        let mailer = if run.email {
            Some(self.mailer.as_ref().ok_or_else(|| {
                AppError::config(
                    "emailing requires SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD and SMTP_FROM",
                )
            })?)
        } else {
            None
        };
        if let Some(to) = &run.to_override
            && !to.validate_email()
        {
            return Err(AppError::config(format!("'{to}' is not a valid address")));
        }

        self.courses.health().await?;
        self.teams.health().await?;

        fs::create_dir_all(&run.output_dir)
            .await
            .map_err(|e| AppError::filesystem(&run.output_dir, e))?;

        let course = self.resolve_course(&run.course).await?;
        let holes = self.course_holes(&course).await?;

        let mut report = BatchReport::default();
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
            let file_name = scorecard_file_name(&team.name, &course.name);
            let bytes = match scorecard::render(team, &course, &holes, run.generated_at) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("skipping team {}: {e}", team.name);
                    report.record_skip();
                    continue;
                }
            };

            let path = run.output_dir.join(&file_name);
            fs::write(&path, &bytes)
                .await
                .map_err(|e| AppError::filesystem(&path, e))?;
            info!("created {}", path.display());
            report.record_success(path);

            if let Some(mailer) = mailer {
                match self.email_one(mailer, team, &course, &file_name, bytes, run).await? {
                    EmailOutcome::Sent => report.record_email(),
                    EmailOutcome::Failed => report.record_email_failure(),
                    EmailOutcome::NoRecipients => {}
                }
            }
        }

        if report.total() == 0 {
            return Err(AppError::empty("no teams matched the selection"));
        }

        info!(
            "scorecard run finished: {} created, {} skipped, {} emailed",
            report.succeeded, report.skipped, report.emailed
        );
        Ok(report)
    }

    async fn resolve_course(&self, wanted: &str) -> Result<Course, AppError> {
        for record in self.courses.courses().await? {
            match record.validate() {
                Ok(course) if course.name.to_lowercase() == wanted.to_lowercase() => {
                    return Ok(course);
                }
                Ok(_) => {}
                Err(e) => warn!("skipping course listing entry: {e}"),
            }
        }
        Err(AppError::empty(format!("course '{wanted}' is not on file")))
    }

    /// Hole rows for the table. A failed or partial listing degrades to
    /// placeholder rows rather than aborting.
    async fn course_holes(&self, course: &Course) -> Result<Vec<Hole>, AppError> {
        let records = match self.courses.holes(&course.name).await {
            Ok(records) => records,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("hole listing for {} unavailable: {e}", course.name);
                return Ok(Vec::new());
            }
        };

        let mut holes = Vec::new();
        for record in records {
            match record.validate() {
                Ok(hole) => holes.push(hole),
                Err(e) => warn!("dropping a hole row for {}: {e}", course.name),
            }
        }
        Ok(holes)
    }

    async fn email_one(
        &self,
        mailer: &Mailer,
        team: &Team,
        course: &Course,
        file_name: &str,
        bytes: Vec<u8>,
        run: &ScorecardRun,
    ) -> Result<EmailOutcome, AppError> {
        let recipients = match self.recipients_for(team, run).await {
            Ok(recipients) => recipients,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("could not resolve recipients for team {}: {e}", team.name);
                return Ok(EmailOutcome::Failed);
            }
        };
        if recipients.is_empty() {
            warn!(
                "no valid addresses on file for team {}; file kept locally",
                team.name
            );
            return Ok(EmailOutcome::NoRecipients);
        }

        match mailer
            .send_scorecard(&recipients, &team.name, &course.name, file_name, bytes)
            .await
        {
            Ok(()) => {
                info!("emailed {} to {}", file_name, recipients.join(", "));
                Ok(EmailOutcome::Sent)
            }
            Err(e) => {
                warn!("email for team {} failed: {e}", team.name);
                Ok(EmailOutcome::Failed)
            }
        }
    }

    async fn recipients_for(
        &self,
        team: &Team,
        run: &ScorecardRun,
    ) -> Result<Vec<String>, AppError> {
        if let Some(to) = &run.to_override {
            return Ok(vec![to.clone()]);
        }

        let mut recipients = Vec::new();
        for record in self.teams.players(team.number).await? {
            match record.validate() {
                Ok(player) => {
                    if let Some(email) = player.email {
                        if email.validate_email() {
                            recipients.push(email);
                        } else {
                            warn!(
                                "ignoring invalid address on file for player {}",
                                player.number
                            );
                        }
                    }
                }
                Err(e) => warn!("skipping roster entry for team {}: {e}", team.name),
            }
        }
        Ok(recipients)
    }
}
