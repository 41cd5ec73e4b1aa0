//! Pixel colors for the monochrome panel

#[cfg(feature = "graphics")]
use embedded_graphics::pixelcolor::BinaryColor;

/// Color of a single pixel
///
/// A set bit in display RAM darkens the pixel, so `Black` is the "on" state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    /// Pixel off (bit clear)
    #[default]
    White,
    /// Pixel on (bit set)
    Black,
}

impl Color {
    /// Byte with all eight stacked pixels in this color
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::White => 0x00,
            Color::Black => 0xFF,
        }
    }

    /// Returns the opposite color
    pub fn inverse(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Whether this color sets the bit in display RAM
    pub fn is_on(self) -> bool {
        self == Color::Black
    }

    pub(crate) fn from_bit(set: bool) -> Color {
        if set {
            Color::Black
        } else {
            Color::White
        }
    }
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}
