//! Team card layouts.

use chrono::{DateTime, Utc};

use super::canvas::Canvas;
use super::metrics::Face;
use super::palette::{BLACK, NEUTRAL_GREY, TEAM_PALETTE, WHITE};
use super::{ComposeError, PageTemplate};
use crate::domain::entities::{RosterEntry, TeamCardData};
use crate::qr::QrMatrix;

const MARGIN: f32 = 0.25;

/// Most players that fit on the display card roster.
const ROSTER_LIMIT: usize = 8;

/// Renders one team card to PDF bytes.
pub fn render(
    card: &TeamCardData,
    qr: &QrMatrix,
    template: PageTemplate,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ComposeError> {
    let (width, height) = template.size_in();
    let title = format!("Team Card - {}", card.team_name);
    let canvas = Canvas::new(&title, width, height, generated_at)?;
    match template {
        PageTemplate::Card => draw_card(&canvas, card, qr, generated_at),
        PageTemplate::Compact => draw_compact(&canvas, card, qr),
    }
    canvas.finish()
}

/// One roster line, truncated so two columns fit side by side.
fn roster_line(entry: &RosterEntry) -> String {
    let name = entry.display_name();
    let number = entry.display_number();
    let line = format!("{name} (#{number})");
    if line.chars().count() > 20 {
        let short: String = name.chars().take(15).collect();
        format!("{short}... (#{number})")
    } else {
        line
    }
}

/// The 5x7" display card: green header, roster columns, QR block.
fn draw_card(canvas: &Canvas, card: &TeamCardData, qr: &QrMatrix, generated_at: DateTime<Utc>) {
    let palette = TEAM_PALETTE;
    let width = canvas.width_in();
    let height = canvas.height_in();

    canvas.fill_rect(0.0, 0.0, width, height, WHITE);

    // Header band with team identity.
    canvas.fill_rect(0.0, height - 1.8, width, 1.8, palette.primary);
    canvas.text_centered(&card.team_name, Face::Bold, 18.0, height - 0.5, WHITE);
    let number_text = format!("#{}", card.team_number);
    canvas.text_centered(&number_text, Face::Bold, 56.0, height - 1.4, WHITE);

    // Player count band.
    let info_y = height - 2.1;
    canvas.fill_rect(MARGIN, info_y - 0.25, width - 2.0 * MARGIN, 0.5, palette.accent);
    let count_text = format!("{} Players", card.players.len());
    canvas.text_centered(&count_text, Face::Bold, 16.0, info_y - 0.05, WHITE);

    // Roster in two columns, capped so the QR block still fits.
    let mut current_y = info_y - 0.6;
    if !card.players.is_empty() {
        for (i, entry) in card.players.iter().take(ROSTER_LIMIT).enumerate() {
            let x = if i % 2 == 0 {
                MARGIN + 0.1
            } else {
                width / 2.0 + 0.1
            };
            canvas.text(&roster_line(entry), Face::Regular, 11.0, x, current_y, palette.text);
            if i % 2 == 1 {
                current_y -= 0.15;
            }
        }
        if card.players.len() > ROSTER_LIMIT {
            let more = format!("...and {} more players", card.players.len() - ROSTER_LIMIT);
            canvas.text_centered(&more, Face::Oblique, 9.0, current_y - 0.1, palette.text);
            current_y -= 0.15;
        }
    }

    // QR block slides down below the roster but keeps a bottom margin.
    let qr_size = 1.8;
    let qr_x = (width - qr_size) / 2.0;
    let qr_y = if card.players.is_empty() {
        1.2
    } else {
        (current_y - qr_size - 0.2).max(0.8)
    };
    canvas.fill_rect(qr_x - 0.1, qr_y - 0.1, qr_size + 0.2, qr_size + 0.2, WHITE);
    canvas.stroke_rect(
        qr_x - 0.1,
        qr_y - 0.1,
        qr_size + 0.2,
        qr_size + 0.2,
        palette.primary,
        3.0,
    );
    canvas.qr(qr, qr_x, qr_y, qr_size);
    canvas.text_centered("SCAN TO LOAD TEAM", Face::Bold, 10.0, qr_y - 0.25, palette.text);

    // First tournament, only when it will not crowd the footer.
    let tournament_y = qr_y - 0.35;
    if let Some(first) = card.tournaments.first()
        && tournament_y > 0.6
    {
        let mut name = first.display_name().to_string();
        if name.chars().count() > 35 {
            name = name.chars().take(35).collect::<String>() + "...";
        }
        canvas.text_centered(&name, Face::Regular, 9.0, tournament_y, palette.text);

        if card.tournaments.len() > 1 {
            let more = format!("(+{} more)", card.tournaments.len() - 1);
            canvas.text_centered(&more, Face::Regular, 8.0, tournament_y - 0.12, palette.text);
        }
    }

    let footer = format!(
        "Generated: {} | Team ID: {}",
        generated_at.format("%Y-%m-%d %H:%M"),
        card.team_number
    );
    canvas.text(&footer, Face::Regular, 8.0, MARGIN, 0.2, NEUTRAL_GREY);

    // Decorative border.
    canvas.stroke_rect(
        MARGIN / 2.0,
        MARGIN / 2.0,
        width - MARGIN,
        height - MARGIN,
        palette.secondary,
        2.0,
    );
}

/// The half-letter handout: title, bulleted roster, QR on the right.
fn draw_compact(canvas: &Canvas, card: &TeamCardData, qr: &QrMatrix) {
    let title = format!("Team: {}", card.team_name);
    canvas.text(&title, Face::Bold, 24.0, 0.5, 4.5, BLACK);

    canvas.qr(qr, 5.5, 1.0, 2.5);

    let mut y = 3.5;
    canvas.text(
        &format!("Team Number: {}", card.team_number),
        Face::Regular,
        12.0,
        0.5,
        y,
        BLACK,
    );
    y -= 0.3;
    if !card.players.is_empty() {
        canvas.text("Players:", Face::Regular, 12.0, 0.5, y, BLACK);
        y -= 0.2;
        for entry in card.players.iter().take(10) {
            let line = format!(
                "\u{2022} {} (#{})",
                entry.display_name(),
                entry.display_number()
            );
            canvas.text(&line, Face::Regular, 12.0, 0.7, y, BLACK);
            y -= 0.2;
        }
    }
}
