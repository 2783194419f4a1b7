//! Printable scorecard layout.
//!
//! A letter sheet per team and course: an 18-row table with hole names and
//! pars, and four blank score columns to fill in with a pencil. Geometry is
//! specified in points because the sheet was designed against letter paper.

use chrono::{DateTime, Utc};

use super::canvas::Canvas;
use super::metrics::Face;
use super::palette::BLACK;
use super::ComposeError;
use crate::domain::entities::{Course, Hole, Team};

/// Column baselines in points: hole, name, par, then four player columns.
const COLUMNS: [f32; 7] = [50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0];

const HOLES_PER_ROUND: i64 = 18;

fn pt(points: f32) -> f32 {
    points / 72.0
}

/// Renders one blank scorecard to PDF bytes.
pub fn render(
    team: &Team,
    course: &Course,
    holes: &[Hole],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ComposeError> {
    let title = format!("Scorecard - {} - {}", team.name, course.name);
    let mut canvas = Canvas::new(&title, 8.5, 11.0, generated_at)?;

    canvas.text(
        &format!("Scorecard - Team: {}", team.name),
        Face::Bold,
        18.0,
        pt(50.0),
        pt(750.0),
        BLACK,
    );

    let par = course
        .par
        .map_or_else(|| "N/A".to_string(), |p| p.to_string());
    canvas.text(
        &format!("Course: {} (Par: {par})", course.name),
        Face::Regular,
        12.0,
        pt(50.0),
        pt(720.0),
        BLACK,
    );

    let headers = ["Hole", "Name", "Par", "Player 1", "Player 2", "Player 3", "Player 4"];
    for (header, x) in headers.iter().zip(COLUMNS) {
        canvas.text(header, Face::Bold, 10.0, pt(x), pt(680.0), BLACK);
    }
    canvas.line(pt(45.0), pt(670.0), pt(400.0), pt(670.0), BLACK, 1.0);

    let mut y = 655.0;
    for hole_number in 1..=HOLES_PER_ROUND {
        let hole = holes.iter().find(|h| h.number == hole_number);
        let name = hole.map_or_else(|| format!("Hole {hole_number}"), |h| h.name.clone());
        let par = hole.map_or(3, |h| h.par);

        canvas.text(&hole_number.to_string(), Face::Regular, 9.0, pt(COLUMNS[0]), pt(y), BLACK);
        canvas.text(&name, Face::Regular, 9.0, pt(COLUMNS[1]), pt(y), BLACK);
        canvas.text(&par.to_string(), Face::Regular, 9.0, pt(COLUMNS[2]), pt(y), BLACK);
        // Score cells stay blank for pencil entry.

        y -= 15.0;
        if y < 100.0 {
            canvas.add_page();
            y = 750.0;
        }
    }

    canvas.finish()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    fn team() -> Team {
        Team {
            name: "The Sharks".to_string(),
            number: 7,
        }
    }

    fn course() -> Course {
        Course {
            name: "Black Course".to_string(),
            par: Some(54),
        }
    }

    #[test]
    fn renders_a_full_course() {
        let holes: Vec<Hole> = (1..=18)
            .map(|n| Hole {
                name: format!("Station {n}"),
                number: n,
                par: 3,
            })
            .collect();
        let bytes = render(&team(), &course(), &holes, stamp()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn fills_gaps_for_sparse_hole_listings() {
        // Holes 2..17 missing; rows fall back to placeholder names and par 3.
        let holes = vec![
            Hole {
                name: "Opener".to_string(),
                number: 1,
                par: 2,
            },
            Hole {
                name: "Closer".to_string(),
                number: 18,
                par: 5,
            },
        ];
        render(&team(), &course(), &holes, stamp()).unwrap();
    }

    #[test]
    fn rerun_with_pinned_timestamp_is_identical() {
        let holes = vec![];
        let first = render(&team(), &course(), &holes, stamp()).unwrap();
        let second = render(&team(), &course(), &holes, stamp()).unwrap();
        assert_eq!(first, second);
    }
}
