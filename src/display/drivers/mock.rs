/*
 *  display/drivers/mock.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock panel for tests and dry runs without hardware
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

use std::sync::{Arc, Mutex, MutexGuard};

use log::info;

use crate::display::color::InkColor;
use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::traits::{check_rotation, InkPanel, Palette, PanelCapabilities, ALL_ROTATIONS};

/// Mock panel
///
/// Simulates a panel without hardware. Useful for:
/// - Unit and integration tests
/// - Dry runs on a desktop (`--panel mock`)
///
/// Every operation is recorded in a shared state so tests can keep a
/// handle after the panel has been boxed away.
#[derive(Debug, Clone)]
pub struct MockPanel {
    /// Panel capabilities
    capabilities: PanelCapabilities,

    /// Frame waiting for `show`
    staged: Option<Frame>,

    /// Shared state for testing
    state: Arc<Mutex<MockPanelState>>,
}

/// Internal state for the mock panel (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockPanelState {
    /// Number of times set_image() was called
    pub set_image_count: usize,

    /// Number of times show() was called
    pub show_count: usize,

    /// Last border colour set
    pub last_border: Option<InkColor>,

    /// Last rotation set
    pub last_rotation: Option<u16>,

    /// Most recently shown frame
    pub last_shown: Option<Frame>,

    /// Simulate failures (for error testing)
    pub simulate_show_failure: bool,
}

impl MockPanel {
    /// Create a mock panel with specific dimensions and a red accent
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            capabilities: PanelCapabilities {
                name: "mock",
                width,
                height,
                palette: Palette::BlackWhiteRed,
                rotations: ALL_ROTATIONS,
            },
            staged: None,
            state: Arc::new(Mutex::new(MockPanelState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockPanelState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MockPanelState>, DisplayError> {
        self.state
            .lock()
            .map_err(|_| DisplayError::Other("mock panel state poisoned".to_string()))
    }
}

impl InkPanel for MockPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn set_border(&mut self, colour: InkColor) -> Result<(), DisplayError> {
        self.lock()?.last_border = Some(colour);
        Ok(())
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        check_rotation(&self.capabilities, degrees)?;
        self.lock()?.last_rotation = Some(degrees);
        Ok(())
    }

    fn set_image(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let expected = (self.capabilities.width as usize, self.capabilities.height as usize);
        if (frame.width(), frame.height()) != expected {
            return Err(DisplayError::BufferSizeMismatch {
                expected: expected.0 * expected.1,
                actual: frame.width() * frame.height(),
            });
        }
        self.lock()?.set_image_count += 1;
        self.staged = Some(frame.clone());
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let frame = self.staged.clone().ok_or(DisplayError::NoImage)?;
        let mut state = self.lock()?;

        if state.simulate_show_failure {
            return Err(DisplayError::Other("Simulated show failure".to_string()));
        }

        state.show_count += 1;
        info!(
            "Mock panel refresh #{} ({} black, {} red pixels)",
            state.show_count,
            frame.count(InkColor::Black),
            frame.count(InkColor::Red)
        );
        state.last_shown = Some(frame);
        Ok(())
    }
}
