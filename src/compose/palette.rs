//! Card color schemes.

/// One opaque RGB color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const WHITE: Tint = Tint::new(0xFF, 0xFF, 0xFF);
pub const BLACK: Tint = Tint::new(0x00, 0x00, 0x00);

/// Grey used for footers and the par band.
pub const NEUTRAL_GREY: Tint = Tint::new(0x66, 0x66, 0x66);

/// Scheme for one hole card.
#[derive(Debug, Clone, Copy)]
pub struct HolePalette {
    /// Header band and QR frame. Keyed off the course name.
    pub primary: Tint,
    /// Par band behind the "PAR n" line.
    pub band: Tint,
    /// Body text such as the QR label.
    pub text: Tint,
}

/// Picks the hole card scheme for a course.
///
/// The two named house courses keep their traditional colors; anything
/// else gets the default blue.
pub fn hole_palette(course_name: &str) -> HolePalette {
    let primary = match course_name {
        "Black Course" => BLACK,
        "Red Course" => Tint::new(0xCC, 0x00, 0x00),
        _ => Tint::new(0x2E, 0x86, 0xAB),
    };
    HolePalette {
        primary,
        band: NEUTRAL_GREY,
        text: Tint::new(0x0B, 0x0C, 0x10),
    }
}

/// Fixed green scheme shared by every team card.
#[derive(Debug, Clone, Copy)]
pub struct TeamPalette {
    /// Header band and QR frame.
    pub primary: Tint,
    /// Decorative border.
    pub secondary: Tint,
    /// Player count band.
    pub accent: Tint,
    /// Roster and label text.
    pub text: Tint,
}

pub const TEAM_PALETTE: TeamPalette = TeamPalette {
    primary: Tint::new(0x1B, 0x43, 0x32),
    secondary: Tint::new(0x2D, 0x6A, 0x4F),
    accent: Tint::new(0x40, 0x91, 0x6C),
    text: Tint::new(0x08, 0x1C, 0x15),
};
