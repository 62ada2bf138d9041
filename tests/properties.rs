/*
 *  tests/properties.rs
 *
 *  Property-based tests for the classifier and the phraser
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 */

use std::collections::BTreeSet;

use proptest::{prop_assert, prop_assert_eq};

use work_clock::phrase::{phrase, BUCKET_WORDS, ROLLOVER_MINUTE};
use work_clock::schedule::{classify, DisplayState, ScheduleConfig};

/// Half-open minute ranges per bucket word
const BUCKETS: [(&str, &[(u8, u8)]); 7] = [
    ("bang on", &[(0, 5)]),
    ("five", &[(5, 10), (55, 60)]),
    ("ten", &[(10, 15), (50, 55)]),
    ("a quarter", &[(15, 20), (45, 50)]),
    ("twenty", &[(20, 25), (40, 45)]),
    ("twenty-five", &[(25, 30), (35, 40)]),
    ("half", &[(30, 35)]),
];

proptest::proptest! {
    /// Weekend days win over any hour; otherwise the hour window decides.
    #[test]
    fn classify_is_total_and_weekend_dominates(
        weekday in 0u8..7,
        hour in 0u8..24,
        days in proptest::collection::btree_set(0u8..7, 0..7),
        start in 0u8..24,
        end in 0u8..24,
    ) {
        let cfg = ScheduleConfig::new(days.iter().copied(), start, end);
        let state = classify(weekday, hour, &cfg);
        let expected = if days.contains(&weekday) {
            DisplayState::Weekend
        } else if start <= hour && hour < end {
            DisplayState::Working
        } else {
            DisplayState::OffHours
        };
        prop_assert_eq!(state, expected);
    }

    /// Exactly one bucket owns each minute and it names fragment1.
    #[test]
    fn buckets_partition_the_hour(hour in 0u8..24, minute in 0u8..60) {
        let owners: Vec<&str> = BUCKETS
            .iter()
            .filter(|(_, ranges)| ranges.iter().any(|&(lo, hi)| lo <= minute && minute < hi))
            .map(|(word, _)| *word)
            .collect();
        prop_assert_eq!(owners.len(), 1, "minute {} owned by {:?}", minute, owners);

        let p = phrase(hour, minute);
        prop_assert!(BUCKET_WORDS.contains(&p.fragment1.as_str()));
        prop_assert_eq!(p.fragment1, owners[0]);
    }

    /// Same input, same phrase.
    #[test]
    fn phrase_is_pure(hour in 0u8..24, minute in 0u8..60) {
        prop_assert_eq!(phrase(hour, minute), phrase(hour, minute));
    }

    /// The spoken hour stays on a 12 hour face and the direction word
    /// flips at the rollover minute.
    #[test]
    fn phrase_shape(hour in 0u8..24, minute in 0u8..60) {
        let p = phrase(hour, minute);
        prop_assert!((1..=12).contains(&p.hour));
        prop_assert_eq!(p.suffix, "ish");
        if minute < 5 {
            prop_assert_eq!(p.fragment3, "o'clock");
        } else if minute < ROLLOVER_MINUTE {
            prop_assert_eq!(p.fragment2, "past");
        } else {
            prop_assert_eq!(p.fragment2, "to");
        }
    }
}

#[test]
fn test_every_bucket_word_is_reachable() {
    let seen: BTreeSet<String> = (0..60).map(|m| phrase(10, m).fragment1).collect();
    let all: BTreeSet<String> = BUCKET_WORDS.iter().map(|w| w.to_string()).collect();
    assert_eq!(seen, all);
}
