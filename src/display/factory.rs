/*
 *  display/factory.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Builds the configured panel
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

use log::info;
#[cfg(feature = "driver-inky")]
use log::warn;

use crate::config::{PanelKind, Settings};
use crate::display::drivers::mock::MockPanel;
use crate::display::drivers::netpbm::NetpbmPanel;
use crate::display::error::DisplayError;
use crate::display::traits::{InkPanel, Palette};

#[cfg(feature = "driver-inky")]
use crate::display::drivers::inky;

/// Type alias for boxed panel trait objects
pub type BoxedPanel = Box<dyn InkPanel>;

/// Factory for creating panels from resolved settings
pub struct PanelFactory;

impl PanelFactory {
    /// Create the panel named by `settings.panel`
    ///
    /// The Inky pHAT has a fixed 250x122 canvas and ignores the configured
    /// width and height; the file and mock panels use them as given.
    pub fn create(settings: &Settings) -> Result<BoxedPanel, DisplayError> {
        if settings.width == 0 || settings.height == 0 {
            return Err(DisplayError::InvalidConfiguration(
                "panel width/height must be > 0".to_string(),
            ));
        }

        let panel: BoxedPanel = match settings.panel {
            #[cfg(feature = "driver-inky")]
            PanelKind::Inky => {
                if (settings.width, settings.height) != (inky::WIDTH, inky::HEIGHT) {
                    warn!(
                        "Inky pHAT is {}x{}, ignoring configured {}x{}",
                        inky::WIDTH, inky::HEIGHT, settings.width, settings.height
                    );
                }
                Box::new(inky::linux::open(&settings.pins)?)
            }

            #[cfg(not(feature = "driver-inky"))]
            PanelKind::Inky => {
                return Err(DisplayError::InvalidConfiguration(
                    "Inky driver not enabled. Enable with --features driver-inky".to_string(),
                ));
            }

            PanelKind::Netpbm => Box::new(NetpbmPanel::new(
                &settings.output,
                settings.width,
                settings.height,
                Palette::BlackWhiteRed,
            )),

            PanelKind::Mock => Box::new(MockPanel::new(settings.width, settings.height)),
        };

        let caps = panel.capabilities();
        info!("Using {} panel ({}x{}, {:?})", caps.name, caps.width, caps.height, caps.palette);
        Ok(panel)
    }
}
