/*
 *  display/drivers/inky.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Inky pHAT (SSD1608 family) red/black/white e-paper driver
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

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use log::{debug, info};

use crate::display::color::InkColor;
use crate::display::error::DisplayError;
use crate::display::framebuffer::{Frame, Planes};
use crate::display::traits::{check_rotation, InkPanel, Palette, PanelCapabilities};

/// Canvas as drawn, landscape
pub const WIDTH: u32 = 250;
pub const HEIGHT: u32 = 122;

/// Controller RAM is portrait: 122 source lines by 250 gate lines
const RAM_COLS: usize = HEIGHT as usize;
const RAM_ROWS: usize = WIDTH as usize;

const BUSY_POLL_MS: u32 = 10;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;
const RESET_HOLD_MS: u32 = 500;

mod cmd {
    pub const DRIVER_CONTROL: u8 = 0x01;
    pub const DEEP_SLEEP: u8 = 0x10;
    pub const DATA_MODE: u8 = 0x11;
    pub const SOFT_RESET: u8 = 0x12;
    pub const TEMP_SENSOR: u8 = 0x18;
    pub const MASTER_ACTIVATE: u8 = 0x20;
    pub const UPDATE_CONTROL_2: u8 = 0x22;
    pub const WRITE_RAM_BW: u8 = 0x24;
    pub const WRITE_RAM_RED: u8 = 0x26;
    pub const BORDER: u8 = 0x3C;
    pub const RAM_X_RANGE: u8 = 0x44;
    pub const RAM_Y_RANGE: u8 = 0x45;
    pub const RAM_X_COUNT: u8 = 0x4E;
    pub const RAM_Y_COUNT: u8 = 0x4F;
}

/// Wiring for the pHAT on a Raspberry Pi header (BCM numbering)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InkyPins {
    pub spi_bus: String,
    pub speed_hz: u32,
    pub dc_pin: u64,
    pub reset_pin: u64,
    pub busy_pin: u64,
}

impl Default for InkyPins {
    fn default() -> Self {
        Self {
            spi_bus: "/dev/spidev0.0".to_string(),
            speed_hz: 488_000,
            dc_pin: 22,
            reset_pin: 27,
            busy_pin: 17,
        }
    }
}

fn spi_err<E: core::fmt::Debug>(e: E) -> DisplayError {
    DisplayError::SpiError(format!("{:?}", e))
}

fn gpio_err<E: core::fmt::Debug>(e: E) -> DisplayError {
    DisplayError::GpioError(format!("{:?}", e))
}

/// Border waveform selection for register 0x3C
fn border_waveform(colour: InkColor) -> u8 {
    match colour {
        InkColor::Black => 0b0000_0000,
        InkColor::Red => 0b0000_0110,
        InkColor::White => 0b0000_0001,
    }
}

/// Inky pHAT driver, generic over embedded-hal 1.0 bus, pins and delay
pub struct InkyPhat<SPI, DC, RST, BUSY, D> {
    spi: SPI,
    dc: DC,
    reset: RST,
    busy: BUSY,
    delay: D,
    capabilities: PanelCapabilities,
    border: InkColor,
    rotation: u16,
    staged: Option<Planes>,
    busy_timeout_ms: u32,
}

impl<SPI, DC, RST, BUSY, D> InkyPhat<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, reset: RST, busy: BUSY, delay: D) -> Self {
        Self {
            spi,
            dc,
            reset,
            busy,
            delay,
            capabilities: PanelCapabilities {
                name: "Inky pHAT (SSD1608)",
                width: WIDTH,
                height: HEIGHT,
                palette: Palette::BlackWhiteRed,
                // landscape mountings of the portrait RAM
                rotations: &[90, 270],
            },
            border: InkColor::White,
            rotation: 90,
            staged: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Builder: give up on the busy line after this long
    pub fn busy_timeout_ms(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    fn command(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(gpio_err)?;
        self.spi.write(&[command]).map_err(spi_err)?;
        if !data.is_empty() {
            self.dc.set_high().map_err(gpio_err)?;
            self.spi.write(data).map_err(spi_err)?;
        }
        Ok(())
    }

    fn wait_busy(&mut self) -> Result<(), DisplayError> {
        let mut waited = 0;
        while self.busy.is_high().map_err(gpio_err)? {
            if waited >= self.busy_timeout_ms {
                return Err(DisplayError::Timeout(format!("busy after {} ms", waited)));
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited += BUSY_POLL_MS;
        }
        Ok(())
    }

    fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.reset.set_low().map_err(gpio_err)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.reset.set_high().map_err(gpio_err)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.command(cmd::SOFT_RESET, &[])?;
        self.wait_busy()
    }

    fn reset_ram_counters(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::RAM_X_COUNT, &[0x00])?;
        self.command(cmd::RAM_Y_COUNT, &[0x00, 0x00])
    }

    fn write_planes(&mut self, planes: &Planes) -> Result<(), DisplayError> {
        let last_row = (RAM_ROWS - 1) as u16;
        let [row_lo, row_hi] = last_row.to_le_bytes();
        let last_col_byte = (planes.stride - 1) as u8;

        self.command(cmd::DRIVER_CONTROL, &[row_lo, row_hi, 0x00])?;
        // x then y increment
        self.command(cmd::DATA_MODE, &[0x03])?;
        self.command(cmd::RAM_X_RANGE, &[0x00, last_col_byte])?;
        self.command(cmd::RAM_Y_RANGE, &[0x00, 0x00, row_lo, row_hi])?;
        self.command(cmd::TEMP_SENSOR, &[0x80])?;
        self.command(cmd::BORDER, &[border_waveform(self.border)])?;

        self.reset_ram_counters()?;
        self.command(cmd::WRITE_RAM_BW, &planes.black_white)?;
        self.reset_ram_counters()?;
        self.command(cmd::WRITE_RAM_RED, &planes.red)?;

        // built-in waveform, full refresh
        self.command(cmd::UPDATE_CONTROL_2, &[0xF7])?;
        self.command(cmd::MASTER_ACTIVATE, &[])?;
        self.wait_busy()
    }
}

impl<SPI, DC, RST, BUSY, D> InkPanel for InkyPhat<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn set_border(&mut self, colour: InkColor) -> Result<(), DisplayError> {
        self.border = colour;
        Ok(())
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        check_rotation(&self.capabilities, degrees)?;
        self.rotation = degrees;
        Ok(())
    }

    fn set_image(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let oriented = frame.rotated(self.rotation)?;
        if (oriented.width(), oriented.height()) != (RAM_COLS, RAM_ROWS) {
            return Err(DisplayError::BufferSizeMismatch {
                expected: RAM_COLS * RAM_ROWS,
                actual: oriented.width() * oriented.height(),
            });
        }
        self.staged = Some(oriented.to_planes(self.capabilities.palette));
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let planes = self.staged.take().ok_or(DisplayError::NoImage)?;
        debug!("Refreshing Inky pHAT ({} bytes per plane)", planes.black_white.len());

        let result = self.hard_reset().and_then(|_| self.write_planes(&planes));
        self.staged = Some(planes);
        result?;

        self.command(cmd::DEEP_SLEEP, &[0x01])?;
        info!("Inky pHAT refreshed");
        Ok(())
    }
}

/// Inky pHAT on Linux spidev with sysfs GPIO
#[cfg(feature = "driver-inky")]
pub mod linux {
    use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
    use linux_embedded_hal::sysfs_gpio::Direction;
    use linux_embedded_hal::{Delay, SpidevDevice, SysfsPin};
    use log::info;

    use super::{gpio_err, InkyPhat, InkyPins};
    use crate::display::error::DisplayError;

    pub type LinuxInkyPhat = InkyPhat<SpidevDevice, SysfsPin, SysfsPin, SysfsPin, Delay>;

    fn pin(number: u64, direction: Direction) -> Result<SysfsPin, DisplayError> {
        let pin = SysfsPin::new(number);
        pin.0.export().map_err(gpio_err)?;
        pin.0.set_direction(direction).map_err(gpio_err)?;
        Ok(pin)
    }

    pub fn open(pins: &InkyPins) -> Result<LinuxInkyPhat, DisplayError> {
        info!("Opening Inky pHAT on {} (DC {}, RESET {}, BUSY {})",
            pins.spi_bus, pins.dc_pin, pins.reset_pin, pins.busy_pin);

        let mut spi = SpidevDevice::open(&pins.spi_bus).map_err(|e| {
            DisplayError::InitializationFailed(format!("Failed to open {}: {:?}", pins.spi_bus, e))
        })?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(pins.speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.0.configure(&options)
            .map_err(|e| DisplayError::SpiError(format!("Failed to configure {}: {}", pins.spi_bus, e)))?;

        let dc = pin(pins.dc_pin, Direction::Out)?;
        let reset = pin(pins.reset_pin, Direction::High)?;
        let busy = pin(pins.busy_pin, Direction::In)?;

        Ok(InkyPhat::new(spi, dc, reset, busy, Delay))
    }
}
