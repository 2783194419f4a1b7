//! Hole card layouts.

use chrono::{DateTime, Utc};

use super::canvas::Canvas;
use super::metrics::Face;
use super::palette::{BLACK, NEUTRAL_GREY, WHITE, hole_palette};
use super::{ComposeError, PageTemplate};
use crate::domain::entities::HoleCardData;
use crate::qr::QrMatrix;

const MARGIN: f32 = 0.25;

/// Renders one hole card to PDF bytes.
pub fn render(
    card: &HoleCardData,
    qr: &QrMatrix,
    template: PageTemplate,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ComposeError> {
    let (width, height) = template.size_in();
    let title = format!("{} - Hole {}", card.course_name, card.hole_number);
    let canvas = Canvas::new(&title, width, height, generated_at)?;
    match template {
        PageTemplate::Card => draw_card(&canvas, card, qr, generated_at),
        PageTemplate::Compact => draw_compact(&canvas, card, qr),
    }
    canvas.finish()
}

/// The 5x7" display card: course-colored header, par band, QR block.
fn draw_card(canvas: &Canvas, card: &HoleCardData, qr: &QrMatrix, generated_at: DateTime<Utc>) {
    let palette = hole_palette(&card.course_name);
    let width = canvas.width_in();
    let height = canvas.height_in();

    canvas.fill_rect(0.0, 0.0, width, height, WHITE);

    // Header band with course and hole identity.
    canvas.fill_rect(0.0, height - 1.5, width, 1.5, palette.primary);
    canvas.text_centered(&card.course_name, Face::Bold, 16.0, height - 0.4, WHITE);
    let headline = format!("{} - {}", card.hole_number, card.display_name());
    canvas.text_centered(&headline, Face::Bold, 36.0, height - 1.2, WHITE);

    // Par band.
    let par_y = height - 1.8;
    canvas.fill_rect(MARGIN, par_y - 0.3, width - 2.0 * MARGIN, 0.6, palette.band);
    let par_text = format!("PAR {}", card.par_or_default());
    canvas.text_centered(&par_text, Face::Bold, 24.0, par_y - 0.1, WHITE);

    // QR block on a white backing with a framed edge.
    let qr_size = 2.2;
    let qr_x = (width - qr_size) / 2.0;
    let qr_y = 0.8;
    canvas.fill_rect(
        qr_x - 0.1,
        qr_y - 0.1,
        qr_size + 0.2,
        qr_size + 0.2,
        WHITE,
    );
    canvas.stroke_rect(
        qr_x - 0.1,
        qr_y - 0.1,
        qr_size + 0.2,
        qr_size + 0.2,
        palette.primary,
        2.0,
    );
    canvas.qr(qr, qr_x, qr_y, qr_size);
    canvas.text_centered(
        "Scan to load hole information",
        Face::Regular,
        10.0,
        qr_y - 0.3,
        palette.text,
    );

    let footer = format!("Generated: {} via API", generated_at.format("%Y-%m-%d %H:%M"));
    canvas.text(&footer, Face::Regular, 8.0, MARGIN, 0.2, NEUTRAL_GREY);
}

/// The half-letter handout: title, detail lines, QR on the right.
fn draw_compact(canvas: &Canvas, card: &HoleCardData, qr: &QrMatrix) {
    let title = format!("Hole {}: {}", card.hole_number, card.display_name());
    canvas.text(&title, Face::Bold, 24.0, 0.5, 4.5, BLACK);

    canvas.qr(qr, 5.5, 1.0, 2.5);

    let par = card
        .hole_par
        .map_or_else(|| "N/A".to_string(), |p| p.to_string());
    let location = card.location_name.as_deref().unwrap_or("N/A");

    let mut y = 3.5;
    canvas.text(
        &format!("Course: {}", card.course_name),
        Face::Regular,
        12.0,
        0.5,
        y,
        BLACK,
    );
    y -= 0.3;
    canvas.text(&format!("Par: {par}"), Face::Regular, 12.0, 0.5, y, BLACK);
    y -= 0.3;
    canvas.text(
        &format!("Location: {location}"),
        Face::Regular,
        12.0,
        0.5,
        y,
        BLACK,
    );
}
