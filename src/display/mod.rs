/*
 *  display/mod.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  E-ink display subsystem
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;
pub mod framebuffer;
pub mod factory;

// Text placement and rendering
pub mod layout;
pub mod text;

// Panel drivers
pub mod drivers;

// Re-exports for convenience
pub use traits::{InkPanel, Palette, PanelCapabilities};
pub use error::DisplayError;
pub use color::InkColor;
pub use framebuffer::{Frame, Planes};
pub use factory::{BoxedPanel, PanelFactory};
pub use layout::{FontSize, Fragment, HAnchor, RenderSpec, VAnchor};
pub use text::TextRenderer;
pub use drivers::mock::{MockPanel, MockPanelState};
pub use drivers::netpbm::NetpbmPanel;
