//! Drawing surface over the PDF backend.
//!
//! Wraps `printpdf` behind an inch-based, bottom-left-origin coordinate
//! system so the layout code reads like the measurements on a printed
//! proof. Output is kept reproducible: document metadata is pinned to the
//! batch timestamp and nothing random (XMP ids, ICC profiles) is emitted.

use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, CustomPdfConformance, IndirectFontRef, Line, Mm, PdfConformance,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};

use super::ComposeError;
use super::metrics::Face;
use super::palette::Tint;
use crate::qr::{QUIET_ZONE, QrMatrix};

const MM_PER_INCH: f32 = 25.4;

fn mm(inches: f32) -> Mm {
    Mm(inches * MM_PER_INCH)
}

fn rgb(tint: Tint) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(tint.r) / 255.0,
        f32::from(tint.g) / 255.0,
        f32::from(tint.b) / 255.0,
        None,
    ))
}

/// One document under construction.
pub struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    width_in: f32,
    height_in: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Canvas {
    /// Opens a document with a single page of the given size.
    ///
    /// `generated_at` becomes both the creation and modification date in
    /// the document trailer, so a rerun with a pinned timestamp reproduces
    /// the file byte for byte.
    pub fn new(
        title: &str,
        width_in: f32,
        height_in: f32,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, ComposeError> {
        let (doc, page, layer) = PdfDocument::new(title, mm(width_in), mm(height_in), "content");

        let stamp = time::OffsetDateTime::from_unix_timestamp(generated_at.timestamp())
            .map_err(|e| ComposeError::Timestamp(e.to_string()))?;
        let doc = doc
            .with_conformance(PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                ..Default::default()
            }))
            .with_creation_date(stamp)
            .with_mod_date(stamp);

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ComposeError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ComposeError::Pdf(e.to_string()))?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ComposeError::Pdf(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            width_in,
            height_in,
            regular,
            bold,
            oblique,
        })
    }

    pub fn width_in(&self) -> f32 {
        self.width_in
    }

    pub fn height_in(&self) -> f32 {
        self.height_in
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Oblique => &self.oblique,
        }
    }

    /// Draws `text` with its baseline starting at `(x, y)` inches.
    pub fn text(&self, text: &str, face: Face, size_pt: f32, x: f32, y: f32, color: Tint) {
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(text, size_pt, mm(x), mm(y), self.font(face));
    }

    /// Draws `text` horizontally centered on the page at baseline `y`.
    pub fn text_centered(&self, text: &str, face: Face, size_pt: f32, y: f32, color: Tint) {
        let x = (self.width_in - face.text_width_in(text, size_pt)) / 2.0;
        self.text(text, face, size_pt, x, y, color);
    }

    /// Fills the rectangle with corner `(x, y)` and the given extent.
    pub fn fill_rect(&self, x: f32, y: f32, width: f32, height: f32, color: Tint) {
        self.layer.set_fill_color(rgb(color));
        let rect = Rect::new(mm(x), mm(y), mm(x + width), mm(y + height))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    /// Strokes the rectangle outline at `line_pt` points thickness.
    pub fn stroke_rect(&self, x: f32, y: f32, width: f32, height: f32, color: Tint, line_pt: f32) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(line_pt);
        let rect = Rect::new(mm(x), mm(y), mm(x + width), mm(y + height))
            .with_mode(PaintMode::Stroke);
        self.layer.add_rect(rect);
    }

    /// Strokes a straight line between two points.
    pub fn line(&self, x1: f32, y1: f32, x2: f32, y2: f32, color: Tint, line_pt: f32) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(line_pt);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(mm(x1), mm(y1)), false),
                (Point::new(mm(x2), mm(y2)), false),
            ],
            is_closed: false,
        });
    }

    /// Draws a QR symbol as vector squares inside the `size_in` box at
    /// `(x, y)`.
    ///
    /// The quiet zone is part of the box, so the box edge is safe to trace
    /// with a frame. Dark modules are drawn in plain black; the backing is
    /// whatever was painted underneath.
    pub fn qr(&self, matrix: &QrMatrix, x: f32, y: f32, size_in: f32) {
        let module = size_in / matrix.total_width() as f32;
        self.layer.set_fill_color(rgb(super::palette::BLACK));
        for (mx, my) in matrix.dark_modules() {
            let px = x + (QUIET_ZONE + mx) as f32 * module;
            // QR rows count from the top, page coordinates from the bottom.
            let py = y + size_in - (QUIET_ZONE + my + 1) as f32 * module;
            let rect = Rect::new(mm(px), mm(py), mm(px + module), mm(py + module))
                .with_mode(PaintMode::Fill);
            self.layer.add_rect(rect);
        }
    }

    /// Starts a fresh page of the same size and draws there from now on.
    pub fn add_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(mm(self.width_in), mm(self.height_in), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    /// Serializes the finished document.
    pub fn finish(self) -> Result<Vec<u8>, ComposeError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ComposeError::Pdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::compose::palette::{BLACK, WHITE};

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn produces_a_pdf_header() {
        let canvas = Canvas::new("Test Card", 5.0, 7.0, stamp()).unwrap();
        canvas.text("hello", Face::Regular, 12.0, 1.0, 1.0, BLACK);
        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn identical_drawing_is_byte_identical() {
        let render = || {
            let mut canvas = Canvas::new("Test Card", 5.0, 7.0, stamp()).unwrap();
            canvas.fill_rect(0.0, 6.0, 5.0, 1.0, Tint::new(0x2E, 0x86, 0xAB));
            canvas.text_centered("Hole 3", Face::Bold, 24.0, 6.3, WHITE);
            let matrix = QrMatrix::encode("{\"hole_number\":3}").unwrap();
            canvas.qr(&matrix, 1.4, 0.8, 2.2);
            canvas.add_page();
            canvas.text("page two", Face::Oblique, 9.0, 1.0, 1.0, BLACK);
            canvas.finish().unwrap()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn qr_quiet_zone_stays_inside_the_box() {
        let matrix = QrMatrix::encode("par 3").unwrap();
        let module = 2.2 / matrix.total_width() as f32;
        // Last dark column ends one quiet zone short of the box edge.
        let rightmost = (QUIET_ZONE + matrix.width()) as f32 * module;
        assert!((rightmost + QUIET_ZONE as f32 * module - 2.2).abs() < 1e-4);
    }
}
