/*
 *  display/layout.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Anchored text fragments and third-of-panel placement
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

use embedded_graphics::geometry::{Point, Size};

use super::color::InkColor;

/// Gap between text and panel edges, in pixels
pub const PADDING: i32 = 10;

/// Horizontal placement of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAnchor {
    Left,
    Center,
    Right,
    /// Absolute x offset
    Pixel(i32),
}

/// Vertical placement, centred within a third of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
    /// Absolute y offset
    Pixel(i32),
}

/// Font sizes, resolved to a face by the text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Big,
}

/// One piece of text and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub h: HAnchor,
    pub v: VAnchor,
    pub font: FontSize,
    pub colour: InkColor,
}

impl Fragment {
    /// Small black text, the common case
    pub fn new(text: impl Into<String>, h: HAnchor, v: VAnchor) -> Self {
        Self {
            text: text.into(),
            h,
            v,
            font: FontSize::Small,
            colour: InkColor::Black,
        }
    }

    /// Builder: set font size
    pub fn font(mut self, font: FontSize) -> Self {
        self.font = font;
        self
    }

    /// Builder: set ink colour
    pub fn colour(mut self, colour: InkColor) -> Self {
        self.colour = colour;
        self
    }
}

/// Everything to draw for one frame, in drawing order
pub type RenderSpec = Vec<Fragment>;

/// Top-left corner for text of `text_size` on a `canvas` sized panel.
pub fn anchor_point(h: HAnchor, v: VAnchor, text_size: Size, canvas: Size, padding: i32) -> Point {
    let (mw, mh) = (text_size.width as i32, text_size.height as i32);
    let (w, ht) = (canvas.width as i32, canvas.height as i32);

    let x = match h {
        HAnchor::Left => padding,
        HAnchor::Center => w / 2 - mw / 2,
        HAnchor::Right => w - mw - padding,
        HAnchor::Pixel(x) => x,
    };

    let y = match v {
        VAnchor::Top => ht / 6 - mh / 2 + padding,
        VAnchor::Middle => ht / 2 - mh / 2,
        VAnchor::Bottom => ht * 5 / 6 - mh / 2 - padding,
        VAnchor::Pixel(y) => y,
    };

    Point::new(x, y)
}
