//! In-memory RGBA raster buffer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque color expressed as three 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Fully opaque RGBA bytes of the color.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, u8::MAX]
    }

    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitively.
    pub fn from_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ColorParseError(text.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError(text.to_owned()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_hex(text)
    }
}

/// Text that is not a `#RRGGBB` color.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{0}` is not a #RRGGBB color")]
pub struct ColorParseError(pub String);

/// Reasons a raster buffer may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RasterError {
    /// The byte count does not match the dimensions.
    #[error("expected {expected} RGBA bytes for the dimensions, got {actual}")]
    LengthMismatch {
        /// Bytes required by `width * height * 4`.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The dimensions overflow the address space.
    #[error("raster dimensions {width}x{height} are too large")]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Row-major RGBA pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a raster of the given size filled with one opaque color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, RasterError> {
        let count = pixel_count(width, height)?;
        let pixels = color.to_rgba().repeat(count);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a white raster; small dimensions cannot overflow.
    #[must_use]
    pub fn blank(width: u16, height: u16) -> Self {
        let count = usize::from(width) * usize::from(height);
        Self {
            width: u32::from(width),
            height: u32::from(height),
            pixels: Rgb::WHITE.to_rgba().repeat(count),
        }
    }

    /// Wraps existing RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = pixel_count(width, height)?
            .checked_mul(4)
            .ok_or(RasterError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes of the pixel, or `None` outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        self.pixels.get(offset..offset + 4)?.try_into().ok()
    }

    /// Overwrites the pixel; returns `false` outside the raster.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        let Some(offset) = self.offset(x, y) else {
            return false;
        };
        match self.pixels.get_mut(offset..offset + 4) {
            Some(bytes) => {
                bytes.copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    /// Borrows the RGBA bytes.
    #[must_use]
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Releases the RGBA bytes.
    #[must_use]
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            let width = usize::try_from(self.width).ok()?;
            let x = usize::try_from(x).ok()?;
            let y = usize::try_from(y).ok()?;
            Some(y * width + x)
        } else {
            None
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        self.index(x, y).map(|index| index * 4)
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, RasterError> {
    usize::try_from(u64::from(width) * u64::from(height))
        .map_err(|_| RasterError::TooLarge { width, height })
}
