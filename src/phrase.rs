/*
 *  phrase.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Five minute bucketed natural language time phrases
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

use std::fmt;

/// Minute at which phrasing switches from "past" this hour to "to" the next.
pub const ROLLOVER_MINUTE: u8 = 35;

/// Trailing fragment on every phrase.
pub const SUFFIX: &str = "ish";

/// Every value `fragment1` can take.
pub const BUCKET_WORDS: [&str; 7] = [
    "bang on",
    "five",
    "ten",
    "a quarter",
    "twenty",
    "twenty-five",
    "half",
];

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
    "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// The pieces of an approximate time, in screen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePhrase {
    pub fragment1: String,
    pub fragment2: String,
    pub fragment3: String,
    pub suffix: &'static str,
    /// 12-hour clock hour the phrase refers to (1-12)
    pub hour: u8,
}

impl fmt::Display for TimePhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.fragment1, self.fragment2, self.fragment3, self.suffix)
    }
}

/// Spell out a number in English words, hyphenating compound tens.
///
/// Covers 0-99 which is far more than an hour hand needs; anything larger
/// falls back to digits.
pub fn spell_number(n: u32) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let (tens, ones) = ((n / 10) as usize, (n % 10) as usize);
            if ones == 0 {
                TENS[tens].to_string()
            } else {
                format!("{}-{}", TENS[tens], ONES[ones])
            }
        }
        _ => n.to_string(),
    }
}

/// Hour shown for a given time, rolled forward once the minute reaches
/// the "to" half of the hour and folded onto a 12-hour face.
///
/// Midnight reads as twelve rather than zero.
pub fn displayed_hour(hour24: u8, minute: u8) -> u8 {
    let advance = minute >= ROLLOVER_MINUTE;
    let h = match hour24 {
        0..=11 => if advance { hour24 + 1 } else { hour24 },
        12 => if advance { 1 } else { 12 },
        _ => if advance { hour24 - 11 } else { hour24 - 12 },
    };
    if h == 0 { 12 } else { h }
}

/// Five minute bucket word for the raw minute value.
pub fn bucket(minute: u8) -> &'static str {
    match minute {
        0..=4 => "bang on",
        5..=9 | 55.. => "five",
        10..=14 | 50..=54 => "ten",
        15..=19 | 45..=49 => "a quarter",
        20..=24 | 40..=44 => "twenty",
        25..=29 | 35..=39 => "twenty-five",
        _ => "half",
    }
}

/// Build the phrase for a 24-hour time.
pub fn phrase(hour24: u8, minute: u8) -> TimePhrase {
    let hour = displayed_hour(hour24, minute);
    let hour_words = spell_number(hour as u32);
    let fragment1 = bucket(minute);

    let (fragment2, fragment3) = if minute < 5 {
        (hour_words, "o'clock".to_string())
    } else {
        let direction = if minute < ROLLOVER_MINUTE { "past" } else { "to" };
        (direction.to_string(), hour_words)
    };

    TimePhrase {
        fragment1: fragment1.to_string(),
        fragment2,
        fragment3,
        suffix: SUFFIX,
        hour,
    }
}
