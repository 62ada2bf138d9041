/*
 *  display/color.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Three colour e-ink palette
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::PixelColor;

use super::traits::Palette;

/// An e-ink pixel
///
/// Inky style panels carry a black/white plane plus an optional accent
/// plane, so a pixel is one of three inks rather than a grey level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InkColor {
    /// Unpainted paper
    #[default]
    White,

    /// Black ink
    Black,

    /// Accent ink (red on the pHAT)
    Red,
}

impl PixelColor for InkColor {
    // no packed raw representation; panels pack planes themselves
    type Raw = ();
}

impl InkColor {
    /// Colour as the given palette can actually show it.
    ///
    /// Black/white panels have no accent plane so red prints as black.
    pub fn for_palette(self, palette: Palette) -> InkColor {
        match (self, palette) {
            (InkColor::Red, Palette::BlackWhite) => InkColor::Black,
            (c, _) => c,
        }
    }

    /// 24-bit RGB used when writing preview images
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            InkColor::White => [0xFF, 0xFF, 0xFF],
            InkColor::Black => [0x00, 0x00, 0x00],
            InkColor::Red => [0xC8, 0x10, 0x10],
        }
    }
}

/// Common colour presets
impl InkColor {
    pub const PAPER: InkColor = InkColor::White;
    pub const ACCENT: InkColor = InkColor::Red;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_folding() {
        assert_eq!(InkColor::Red.for_palette(Palette::BlackWhite), InkColor::Black);
        assert_eq!(InkColor::Red.for_palette(Palette::BlackWhiteRed), InkColor::Red);
        assert_eq!(InkColor::White.for_palette(Palette::BlackWhite), InkColor::White);
    }

    #[test]
    fn test_rgb() {
        assert_eq!(InkColor::White.to_rgb(), [255, 255, 255]);
        assert_eq!(InkColor::Black.to_rgb(), [0, 0, 0]);
        assert_ne!(InkColor::Red.to_rgb(), InkColor::Black.to_rgb());
    }

    #[test]
    fn test_default_is_paper() {
        assert_eq!(InkColor::default(), InkColor::PAPER);
    }
}
