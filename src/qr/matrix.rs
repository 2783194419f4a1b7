//! Rendered QR symbols as plain module matrices.

use qrcode::{Color, EcLevel, QrCode};

use crate::error::AppError;

/// Quiet-zone width in modules on each side of the symbol.
pub const QUIET_ZONE: usize = 4;

/// One encoded QR symbol. Coordinates are symbol modules, row major, with
/// the quiet zone kept out of storage and added back by [`total_width`].
///
/// [`total_width`]: QrMatrix::total_width
#[derive(Debug, Clone, PartialEq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encodes `data` at the lowest error-correction level.
    ///
    /// Card payloads run long, and level L keeps the module grid coarse
    /// enough to stay scannable at the printed sizes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Qr`] when the payload exceeds QR capacity.
    pub fn encode(data: &str) -> Result<Self, AppError> {
        let code = QrCode::with_error_correction_level(data, EcLevel::L)?;
        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();
        Ok(Self { width, dark })
    }

    /// Symbol width in modules, quiet zone excluded.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Printable width in modules, quiet zone included on both sides.
    pub fn total_width(&self) -> usize {
        self.width + 2 * QUIET_ZONE
    }

    /// Whether the module at symbol coordinates `(x, y)` is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    /// Coordinates of every dark module, in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dark
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_finder_pattern_corner() {
        let matrix = QrMatrix::encode("https://example.com/hole/1").unwrap();
        // Version 1 symbols start at 21 modules.
        assert!(matrix.width() >= 21);
        assert!(matrix.is_dark(0, 0));
        assert_eq!(matrix.total_width(), matrix.width() + 8);
    }

    #[test]
    fn same_payload_encodes_identically() {
        let a = QrMatrix::encode(r#"{"type":"team_card","team_number":4}"#).unwrap();
        let b = QrMatrix::encode(r#"{"type":"team_card","team_number":4}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dark_modules_match_lookup() {
        let matrix = QrMatrix::encode("par 3").unwrap();
        let listed = matrix.dark_modules().count();
        let mut counted = 0;
        for y in 0..matrix.width() {
            for x in 0..matrix.width() {
                if matrix.is_dark(x, y) {
                    counted += 1;
                }
            }
        }
        assert_eq!(listed, counted);
        assert!(counted > 0);
    }
}
