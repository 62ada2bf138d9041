/*
 *  display/traits.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for e-ink panel abstraction
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

use super::color::InkColor;
use super::error::DisplayError;
use super::framebuffer::Frame;

/// Which inks a panel can lay down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Black and white only
    BlackWhite,

    /// Black, white and a red accent plane (Inky pHAT red)
    BlackWhiteRed,
}

/// Panel capabilities and metadata
#[derive(Debug, Clone)]
pub struct PanelCapabilities {
    /// Human readable panel name for logs
    pub name: &'static str,

    /// Canvas width in pixels, as drawn (before rotation)
    pub width: u32,

    /// Canvas height in pixels, as drawn (before rotation)
    pub height: u32,

    /// Inks available
    pub palette: Palette,

    /// Rotations the panel accepts, in degrees
    pub rotations: &'static [u16],
}

impl PanelCapabilities {
    pub fn supports_rotation(&self, degrees: u16) -> bool {
        self.rotations.contains(&degrees)
    }
}

pub const ALL_ROTATIONS: &[u16] = &[0, 90, 180, 270];

/// Validate a rotation against what a panel accepts
pub fn check_rotation(caps: &PanelCapabilities, degrees: u16) -> Result<(), DisplayError> {
    if !ALL_ROTATIONS.contains(&degrees) || !caps.supports_rotation(degrees) {
        return Err(DisplayError::InvalidRotation(degrees));
    }
    Ok(())
}

/// Minimal panel abstraction - every output device implements this
///
/// Updating an e-ink panel is a two step protocol: stage a full frame
/// with `set_image`, then refresh the glass with `show`. Refreshes are
/// slow and wear the panel so callers should only `show` on change.
pub trait InkPanel {
    /// Returns the capabilities of this panel
    fn capabilities(&self) -> &PanelCapabilities;

    /// Returns the canvas dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Colour of the bezel area outside the active pixels
    fn set_border(&mut self, colour: InkColor) -> Result<(), DisplayError>;

    /// Orientation the panel is mounted in
    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError>;

    /// Stage a frame; nothing changes on the glass until `show`
    fn set_image(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Push the staged frame to the glass
    fn show(&mut self) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rotation() {
        let caps = PanelCapabilities {
            name: "test",
            width: 250,
            height: 122,
            palette: Palette::BlackWhiteRed,
            rotations: &[90, 270],
        };
        assert!(check_rotation(&caps, 90).is_ok());
        assert!(matches!(check_rotation(&caps, 180), Err(DisplayError::InvalidRotation(180))));
        assert!(matches!(check_rotation(&caps, 45), Err(DisplayError::InvalidRotation(45))));
    }
}
