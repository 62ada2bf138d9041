/*
 *  schedule.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Work schedule and display state classification
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

use std::collections::BTreeSet;
use std::fmt;

/// Weekday indices as used throughout the schedule (Monday = 0).
pub const MONDAY: u8 = 0;
pub const SATURDAY: u8 = 5;
pub const SUNDAY: u8 = 6;

/// When the clock owner is expected to be at work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Non-working days, 0 = Monday .. 6 = Sunday
    pub weekend_days: BTreeSet<u8>,

    /// First working hour (inclusive, 0-23)
    pub workday_start_hour: u8,

    /// First non-working hour after work (exclusive, 0-23)
    pub workday_end_hour: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekend_days: [SATURDAY, SUNDAY].into_iter().collect(),
            workday_start_hour: 9,
            workday_end_hour: 17,
        }
    }
}

impl ScheduleConfig {
    pub fn new(weekend_days: impl IntoIterator<Item = u8>, start: u8, end: u8) -> Self {
        Self {
            weekend_days: weekend_days.into_iter().collect(),
            workday_start_hour: start,
            workday_end_hour: end,
        }
    }

    /// True when no hour of a working day can ever classify as `Working`.
    pub fn is_degenerate(&self) -> bool {
        self.workday_start_hour >= self.workday_end_hour
    }
}

/// What the panel should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayState {
    Weekend,
    OffHours,
    Working,
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayState::Weekend => write!(f, "weekend"),
            DisplayState::OffHours => write!(f, "off hours"),
            DisplayState::Working => write!(f, "working"),
        }
    }
}

/// Classify a moment against the schedule.
///
/// The weekend check runs first, so a weekend day is never `OffHours`
/// or `Working` regardless of the hour. A schedule whose start is not
/// before its end is used as-is: every hour of a working day lands in
/// `OffHours`.
pub fn classify(weekday: u8, hour24: u8, config: &ScheduleConfig) -> DisplayState {
    if config.weekend_days.contains(&weekday) {
        DisplayState::Weekend
    } else if hour24 < config.workday_start_hour || hour24 >= config.workday_end_hour {
        DisplayState::OffHours
    } else {
        DisplayState::Working
    }
}
