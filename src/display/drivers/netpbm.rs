/*
 *  display/drivers/netpbm.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Headless panel that writes each refresh to a PPM image
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

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::display::color::InkColor;
use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::traits::{check_rotation, InkPanel, Palette, PanelCapabilities, ALL_ROTATIONS};

/// Width of the bezel drawn around the preview, in pixels
pub const BORDER_PX: usize = 4;

/// Writes what the glass would show to a binary PPM file.
///
/// The image is rotated the way the panel is mounted and framed with the
/// border colour so it reads like the real thing.
#[derive(Debug, Clone)]
pub struct NetpbmPanel {
    path: PathBuf,
    capabilities: PanelCapabilities,
    border: InkColor,
    rotation: u16,
    staged: Option<Frame>,
}

impl NetpbmPanel {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, palette: Palette) -> Self {
        Self {
            path: path.into(),
            capabilities: PanelCapabilities {
                name: "netpbm",
                width,
                height,
                palette,
                rotations: ALL_ROTATIONS,
            },
            border: InkColor::White,
            rotation: 0,
            staged: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode a frame as P6 with a `BORDER_PX` bezel
    pub fn encode(frame: &Frame, border: InkColor) -> Vec<u8> {
        let (w, h) = (frame.width() + 2 * BORDER_PX, frame.height() + 2 * BORDER_PX);
        let mut out = format!("P6\n{} {}\n255\n", w, h).into_bytes();
        out.reserve(w * h * 3);

        for y in 0..h {
            for x in 0..w {
                let inner = x.checked_sub(BORDER_PX).zip(y.checked_sub(BORDER_PX));
                let colour = inner
                    .and_then(|(ix, iy)| frame.get(ix, iy))
                    .unwrap_or(border);
                out.extend_from_slice(&colour.to_rgb());
            }
        }
        out
    }
}

impl InkPanel for NetpbmPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn set_border(&mut self, colour: InkColor) -> Result<(), DisplayError> {
        self.border = colour.for_palette(self.capabilities.palette);
        Ok(())
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        check_rotation(&self.capabilities, degrees)?;
        self.rotation = degrees;
        Ok(())
    }

    fn set_image(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let expected = self.capabilities.width as usize * self.capabilities.height as usize;
        let actual = frame.width() * frame.height();
        if actual != expected || frame.width() != self.capabilities.width as usize {
            return Err(DisplayError::BufferSizeMismatch { expected, actual });
        }
        self.staged = Some(frame.clone());
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let frame = self.staged.as_ref().ok_or(DisplayError::NoImage)?;
        let oriented = frame.rotated(self.rotation)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, Self::encode(&oriented, self.border))?;

        info!(
            "Wrote {}x{} preview to {}",
            oriented.width(),
            oriented.height(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[test]
    fn test_encode_header_and_size() {
        let frame = Frame::new(3, 2);
        let bytes = NetpbmPanel::encode(&frame, InkColor::Black);
        let header = b"P6\n11 10\n255\n";
        assert!(bytes.starts_with(header));
        assert_eq!(bytes.len(), header.len() + 11 * 10 * 3);
        // first pixel is bezel
        assert_eq!(&bytes[header.len()..header.len() + 3], &[0, 0, 0]);
    }

    #[test]
    fn test_show_writes_rotated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("clock.ppm");
        let mut panel = NetpbmPanel::new(&path, 6, 2, Palette::BlackWhiteRed);

        let mut frame = Frame::new(6, 2);
        frame.draw_iter([Pixel(Point::new(0, 0), InkColor::Red)]).unwrap();

        panel.set_rotation(90).unwrap();
        panel.set_image(&frame).unwrap();
        panel.show().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P6\n10 14\n255\n"));
    }

    #[test]
    fn test_show_requires_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = NetpbmPanel::new(dir.path().join("x.ppm"), 6, 2, Palette::BlackWhite);
        assert!(matches!(panel.show(), Err(DisplayError::NoImage)));
    }
}
