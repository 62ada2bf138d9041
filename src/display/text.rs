/*
 *  display/text.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Draws anchored text fragments with mono fonts
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

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer as _;
use embedded_graphics::text::{Baseline, Text};

use log::debug;

use super::color::InkColor;
use super::error::DisplayError;
use super::framebuffer::Frame;
use super::layout::{anchor_point, FontSize, Fragment, PADDING};
use super::traits::Palette;

/// Lays out and draws fragments onto a frame.
///
/// Canvas size, faces and palette are fixed at construction.
#[derive(Clone, Copy)]
pub struct TextRenderer {
    canvas: Size,
    padding: i32,
    palette: Palette,
    small: &'static MonoFont<'static>,
    big: &'static MonoFont<'static>,
}

impl TextRenderer {
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self {
            canvas: Size::new(width, height),
            padding: PADDING,
            palette,
            small: &FONT_9X15,
            big: &FONT_10X20,
        }
    }

    fn face(&self, size: FontSize) -> &'static MonoFont<'static> {
        match size {
            FontSize::Small => self.small,
            FontSize::Big => self.big,
        }
    }

    /// Rendered size of a fragment's text
    pub fn measure(&self, fragment: &Fragment) -> Size {
        let style = MonoTextStyle::new(self.face(fragment.font), fragment.colour);
        style
            .measure_string(&fragment.text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
    }

    /// Where a fragment's top-left corner lands
    pub fn position(&self, fragment: &Fragment) -> Point {
        anchor_point(fragment.h, fragment.v, self.measure(fragment), self.canvas, self.padding)
    }

    /// Draw every fragment, in order, onto `target`
    pub fn draw<D>(&self, fragments: &[Fragment], target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = InkColor>,
        D::Error: core::fmt::Debug,
    {
        for fragment in fragments {
            let colour = fragment.colour.for_palette(self.palette);
            let style = MonoTextStyle::new(self.face(fragment.font), colour);
            let at = self.position(fragment);
            debug!("Drawing {:?} at ({}, {})", fragment.text, at.x, at.y);

            Text::with_baseline(&fragment.text, at, style, Baseline::Top)
                .draw(target)
                .map_err(|e| DisplayError::DrawingError(format!("{:?}", e)))?;
        }
        Ok(())
    }

    /// Fresh frame with `fragments` drawn on paper white
    pub fn render(&self, fragments: &[Fragment]) -> Result<Frame, DisplayError> {
        let mut frame = Frame::new(self.canvas.width, self.canvas.height);
        self.draw(fragments, &mut frame)?;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::layout::{HAnchor, VAnchor};

    #[test]
    fn test_measure_uses_font_cell() {
        let renderer = TextRenderer::new(250, 122, Palette::BlackWhiteRed);
        let small = Fragment::new("It's", HAnchor::Left, VAnchor::Top);
        let big = small.clone().font(FontSize::Big);
        assert_eq!(renderer.measure(&small), Size::new(36, 15));
        assert_eq!(renderer.measure(&big), Size::new(40, 20));
    }

    #[test]
    fn test_render_paints_inside_canvas() {
        let renderer = TextRenderer::new(250, 122, Palette::BlackWhiteRed);
        let frame = renderer
            .render(&[
                Fragment::new("It's", HAnchor::Left, VAnchor::Top),
                Fragment::new("not", HAnchor::Center, VAnchor::Top).colour(InkColor::Red),
            ])
            .unwrap();
        assert_eq!((frame.width(), frame.height()), (250, 122));
        assert!(frame.count(InkColor::Black) > 0);
        assert!(frame.count(InkColor::Red) > 0);
    }

    #[test]
    fn test_black_white_palette_has_no_red() {
        let renderer = TextRenderer::new(250, 122, Palette::BlackWhite);
        let frame = renderer
            .render(&[Fragment::new("not", HAnchor::Center, VAnchor::Top).colour(InkColor::Red)])
            .unwrap();
        assert_eq!(frame.count(InkColor::Red), 0);
        assert!(frame.count(InkColor::Black) > 0);
    }

    #[test]
    fn test_right_anchor_respects_padding() {
        let renderer = TextRenderer::new(250, 122, Palette::BlackWhiteRed);
        let ish = Fragment::new("ish", HAnchor::Right, VAnchor::Bottom);
        let at = renderer.position(&ish);
        assert_eq!(at.x + renderer.measure(&ish).width as i32, 240);
    }
}
