//! Named colors offered to the player.

use thiserror::Error;

use crate::raster::Rgb;

/// One entry of the color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    /// Display name.
    pub name: &'static str,
    /// Paint color.
    pub color: Rgb,
}

/// Colors available for filling, in display order.
pub const PALETTE: [Swatch; 12] = [
    swatch("Red", 0xEF, 0x44, 0x44),
    swatch("Orange", 0xF5, 0x9E, 0x0B),
    swatch("Yellow", 0xFA, 0xCC, 0x15),
    swatch("Mint", 0x2D, 0xD4, 0xBF),
    swatch("Green", 0x10, 0xB9, 0x81),
    swatch("Teal", 0x0D, 0x94, 0x88),
    swatch("Sky", 0x7D, 0xD3, 0xFC),
    swatch("Blue", 0x3B, 0x82, 0xF6),
    swatch("Purple", 0x8B, 0x5C, 0xF6),
    swatch("Pink", 0xEC, 0x48, 0x99),
    swatch("Gray", 0x4B, 0x55, 0x63),
    swatch("White", 0xFF, 0xFF, 0xFF),
];

/// Color selected when a session starts.
pub const DEFAULT_SWATCH: Swatch = PALETTE[3];

const fn swatch(name: &'static str, r: u8, g: u8, b: u8) -> Swatch {
    Swatch {
        name,
        color: Rgb::new(r, g, b),
    }
}

/// Text naming neither a palette entry nor a hex color.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{0}` is neither a palette color nor #RRGGBB")]
pub struct PaletteError(pub String);

/// Finds a palette entry by name, ignoring case.
#[must_use]
pub fn find(name: &str) -> Option<&'static Swatch> {
    PALETTE
        .iter()
        .find(|swatch| swatch.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolves a palette name or a `#RRGGBB` literal to a color.
pub fn resolve(text: &str) -> Result<Rgb, PaletteError> {
    if let Some(swatch) = find(text) {
        return Ok(swatch.color);
    }
    Rgb::from_hex(text.trim()).map_err(|_| PaletteError(text.to_owned()))
}
