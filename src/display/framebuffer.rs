/*
 *  display/framebuffer.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime sized three colour frame for embedded-graphics
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::color::InkColor;
use super::error::DisplayError;
use super::traits::Palette;

/// A full panel image, cleared to paper white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    buf: Vec<InkColor>,
    w: usize,
    h: usize,
}

/// Frame packed for an SSD16xx style controller.
///
/// Rows are `stride` bytes, MSB is the leftmost pixel. In the
/// black/white plane 1 is paper; in the red plane 1 is red ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planes {
    pub stride: usize,
    pub black_white: Vec<u8>,
    pub red: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![InkColor::White; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn clear_color(&mut self, color: InkColor) {
        self.buf.fill(color);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<InkColor> {
        if x < self.w && y < self.h {
            self.buf.get(y * self.w + x).copied()
        } else {
            None
        }
    }

    /// Number of pixels painted with `color`
    pub fn count(&self, color: InkColor) -> usize {
        self.buf.iter().filter(|&&c| c == color).count()
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }

    /// Copy of the frame turned clockwise by `degrees` (0, 90, 180, 270).
    pub fn rotated(&self, degrees: u16) -> Result<Frame, DisplayError> {
        let (w, h) = (self.w, self.h);
        let (nw, nh) = match degrees {
            0 | 180 => (w, h),
            90 | 270 => (h, w),
            other => return Err(DisplayError::InvalidRotation(other)),
        };

        let mut buf = Vec::with_capacity(self.buf.len());
        for ny in 0..nh {
            for nx in 0..nw {
                let (sx, sy) = match degrees {
                    0 => (nx, ny),
                    90 => (ny, h - 1 - nx),
                    180 => (w - 1 - nx, h - 1 - ny),
                    _ => (w - 1 - ny, nx),
                };
                buf.push(self.buf[sy * w + sx]);
            }
        }

        Ok(Frame { buf, w: nw, h: nh })
    }

    /// Pack into controller bit planes for the given palette.
    pub fn to_planes(&self, palette: Palette) -> Planes {
        let stride = self.w.div_ceil(8);
        // padding bits stay paper
        let mut black_white = vec![0xFFu8; stride * self.h];
        let mut red = vec![0u8; stride * self.h];

        for y in 0..self.h {
            for x in 0..self.w {
                let byte = y * stride + x / 8;
                let mask = 0x80u8 >> (x % 8);
                match self.buf[y * self.w + x].for_palette(palette) {
                    InkColor::White => {}
                    InkColor::Black => black_white[byte] &= !mask,
                    InkColor::Red => red[byte] |= mask,
                }
            }
        }

        Planes { stride, black_white, red }
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for Frame {
    type Color = InkColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // clip to the frame, the rest is off-glass
        let clipped = area.intersection(&self.bounding_box());
        if let Some(bottom_right) = clipped.bottom_right() {
            for y in clipped.top_left.y..=bottom_right.y {
                let row = y as usize * self.w;
                self.buf[row + clipped.top_left.x as usize..=row + bottom_right.x as usize]
                    .fill(color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_new_frame_is_paper() {
        let frame = Frame::new(10, 4);
        assert_eq!(frame.count(InkColor::White), 40);
        assert_eq!(frame.size(), Size::new(10, 4));
    }

    #[test]
    fn test_draw_clips_out_of_bounds() {
        let mut frame = Frame::new(4, 4);
        frame.draw_iter([
            Pixel(Point::new(1, 1), InkColor::Black),
            Pixel(Point::new(-1, 0), InkColor::Black),
            Pixel(Point::new(4, 0), InkColor::Black),
        ]).unwrap();
        assert_eq!(frame.count(InkColor::Black), 1);
        assert_eq!(frame.get(1, 1), Some(InkColor::Black));
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut frame = Frame::new(8, 8);
        Rectangle::new(Point::new(6, 6), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(InkColor::Red))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.count(InkColor::Red), 4);
    }

    #[test]
    fn test_rotation_moves_corner() {
        let mut frame = Frame::new(3, 2);
        frame.draw_iter([Pixel(Point::new(0, 0), InkColor::Black)]).unwrap();

        let r90 = frame.rotated(90).unwrap();
        assert_eq!((r90.width(), r90.height()), (2, 3));
        assert_eq!(r90.get(1, 0), Some(InkColor::Black));

        let r180 = frame.rotated(180).unwrap();
        assert_eq!(r180.get(2, 1), Some(InkColor::Black));

        let r270 = frame.rotated(270).unwrap();
        assert_eq!((r270.width(), r270.height()), (2, 3));
        assert_eq!(r270.get(0, 2), Some(InkColor::Black));

        assert_eq!(frame.rotated(0).unwrap(), frame);
        assert!(frame.rotated(45).is_err());
    }

    #[test]
    fn test_planes_packing() {
        let mut frame = Frame::new(10, 1);
        frame.draw_iter([
            Pixel(Point::new(0, 0), InkColor::Black),
            Pixel(Point::new(9, 0), InkColor::Red),
        ]).unwrap();

        let planes = frame.to_planes(Palette::BlackWhiteRed);
        assert_eq!(planes.stride, 2);
        assert_eq!(planes.black_white, vec![0x7F, 0xFF]);
        assert_eq!(planes.red, vec![0x00, 0x40]);

        let mono = frame.to_planes(Palette::BlackWhite);
        assert_eq!(mono.black_white, vec![0x7F, 0xBF]);
        assert_eq!(mono.red, vec![0x00, 0x00]);
    }
}
