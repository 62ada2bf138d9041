/*
 *  lib.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Word clock for an e-ink panel
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

//! An approximate word clock ("It's twenty-five past four ish") for
//! small e-ink panels, with separate weekend and off-hours screens and a
//! persisted status marker so the panel only refreshes on change.

pub mod clock;
pub mod composer;
pub mod config;
pub mod display;
pub mod phrase;
pub mod schedule;
pub mod status;

use thiserror::Error;

pub use composer::{DisplayComposer, Outcome, WordClock};
pub use config::{ConfigError, Settings};
pub use display::DisplayError;
pub use status::StorageError;

/// Anything that can end a run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("display error: {0}")]
    Display(#[from] DisplayError),
}

pub type Result<T> = std::result::Result<T, Error>;
