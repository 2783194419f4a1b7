//! Hole card batch generation.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::fs;
use tracing::{info, warn};

use crate::application::batch::BatchReport;
use crate::compose::{PageTemplate, hole_card};
use crate::domain::entities::Hole;
use crate::domain::sources::{CardSource, CourseSource};
use crate::error::AppError;
use crate::qr::{QrMatrix, QrPayload};

/// Options for one hole card run.
#[derive(Debug, Clone)]
pub struct HoleCardRun {
    /// Course names to cover; empty means every course on file.
    pub courses: Vec<String>,
    pub output_dir: PathBuf,
    pub template: PageTemplate,
    pub generated_at: DateTime<Utc>,
}

/// Drives course listings through the composer into `hole_card_*.pdf`
/// files, one per hole.
pub struct HoleCardService<C, Q> {
    courses: Arc<C>,
    cards: Arc<Q>,
}

impl<C, Q> HoleCardService<C, Q>
where
    C: CourseSource,
    Q: CardSource,
{
    pub fn new(courses: Arc<C>, cards: Arc<Q>) -> Self {
        Self { courses, cards }
    }

    /// Course names available for selection.
    pub async fn available_courses(&self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::new();
        for record in self.courses.courses().await? {
            match record.validate() {
                Ok(course) => names.push(course.name),
                Err(e) => warn!("skipping course listing entry: {e}"),
            }
        }
        Ok(names)
    }

    /// Runs one batch. Fatal failures abort with `Err`; per-record
    /// failures are tallied as skips in the report.
    pub async fn run(&self, run: &HoleCardRun) -> Result<BatchReport, AppError> {
        self.courses.health().await?;
        self.cards.health().await?;

        fs::create_dir_all(&run.output_dir)
            .await
            .map_err(|e| AppError::filesystem(&run.output_dir, e))?;

        let mut report = BatchReport::default();
        let stamp = run
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let course_names = if run.courses.is_empty() {
            self.available_courses().await?
        } else {
            run.courses.clone()
        };

        for course_name in &course_names {
            info!("processing course {course_name}");
            let holes = match self.courses.holes(course_name).await {
                Ok(holes) => holes,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("skipping course {course_name}: {e}");
                    report.record_skip();
                    continue;
                }
            };
            if holes.is_empty() {
                warn!("no holes on file for course {course_name}");
                continue;
            }

            for record in holes {
                let listing = match record.validate() {
                    Ok(hole) => hole,
                    Err(e) => {
                        warn!("skipping a hole on {course_name}: {e}");
                        report.record_skip();
                        continue;
                    }
                };
                match self.generate_one(course_name, &listing, run, &stamp).await {
                    Ok(path) => {
                        info!("created {}", path.display());
                        report.record_success(path);
                    }
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!("skipping {course_name} hole {}: {e}", listing.number);
                        report.record_skip();
                    }
                }
            }
        }

        if report.total() == 0 {
            return Err(AppError::empty("no holes matched the course selection"));
        }

        info!(
            "hole card run finished: {} created, {} skipped",
            report.succeeded, report.skipped
        );
        Ok(report)
    }

    async fn generate_one(
        &self,
        course_name: &str,
        listing: &Hole,
        run: &HoleCardRun,
        stamp: &str,
    ) -> Result<PathBuf, AppError> {
        let mut card = self.cards.hole_card(course_name, listing.number).await?;
        card.fill_from_listing(listing);

        let payload = QrPayload::hole_card(&card, stamp).to_json()?;
        let matrix = QrMatrix::encode(&payload)?;
        let bytes = hole_card::render(&card, &matrix, run.template, run.generated_at)?;

        let path = run.output_dir.join(card.file_name());
        fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::filesystem(&path, e))?;
        Ok(path)
    }
}
