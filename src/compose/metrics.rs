//! Text measurement for the built-in Helvetica faces.
//!
//! Centering a line on a card needs its rendered width, and the PDF backend
//! does not measure text for us. The tables below are the glyph widths from
//! the Adobe AFM files for the printable ASCII range, in 1/1000 em units;
//! the oblique face shares the regular metrics.

/// Helvetica family faces used on cards and scorecards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

/// Width assumed for characters outside the table.
const FALLBACK_WIDTH: u32 = 600;

/// Helvetica glyph widths for 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u32; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold glyph widths for 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u32; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl Face {
    fn widths(self) -> &'static [u32; 95] {
        match self {
            Self::Regular | Self::Oblique => &HELVETICA,
            Self::Bold => &HELVETICA_BOLD,
        }
    }

    /// Rendered width of `text` at `size_pt`, in inches.
    pub fn text_width_in(self, text: &str, size_pt: f32) -> f32 {
        let widths = self.widths();
        let units: u32 = text
            .chars()
            .map(|c| match u32::from(c) {
                code @ 0x20..=0x7E => widths[(code - 0x20) as usize],
                _ => FALLBACK_WIDTH,
            })
            .sum();
        units as f32 / 1000.0 * size_pt / 72.0
    }
}
