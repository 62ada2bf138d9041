/*
 *  clock.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Timezone aware wall clock
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

use chrono::{Datelike, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

/// The only parts of "now" the clock face cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
}

impl LocalTime {
    pub fn from_datetime<T: Datelike + Timelike>(t: &T) -> Self {
        Self {
            weekday: t.weekday().num_days_from_monday() as u8,
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

pub trait Clock {
    fn now(&self) -> LocalTime;
}

/// Wall clock in a named IANA zone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for ZonedClock {
    fn now(&self) -> LocalTime {
        LocalTime::from_datetime(&Utc::now().with_timezone(&self.tz))
    }
}

/// Always reports the same local time (used by `--at` and tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalTime);

impl FixedClock {
    pub fn at(weekday: u8, hour: u8, minute: u8) -> Self {
        Self(LocalTime { weekday, hour, minute })
    }

    pub fn from_naive(t: NaiveDateTime) -> Self {
        Self(LocalTime::from_datetime(&t))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> LocalTime {
        self.0
    }
}
