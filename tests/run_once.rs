/*
 *  tests/run_once.rs
 *
 *  End-to-end runs against a mock panel and a real status file
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 */

use std::fs;
use std::path::Path;

use work_clock::clock::FixedClock;
use work_clock::display::{InkColor, MockPanel, NetpbmPanel, Palette};
use work_clock::schedule::{DisplayState, ScheduleConfig};
use work_clock::status::{FileStatusStore, StatusGate, StorageError};
use work_clock::{Outcome, WordClock};

const WEDNESDAY: u8 = 2;
const SATURDAY: u8 = 5;
const SUNDAY: u8 = 6;

fn status_file(dir: &Path, token: &str) -> FileStatusStore {
    let path = dir.join("status");
    fs::write(&path, token).unwrap();
    FileStatusStore::new(path)
}

/// One process invocation: open the gate fresh from disk, run, drop
fn invoke(clock: FixedClock, store: &FileStatusStore, panel: &mut MockPanel) -> Outcome {
    let mut gate = StatusGate::open(store.clone()).unwrap();
    WordClock::new(clock, ScheduleConfig::default(), 90)
        .run_once(&mut gate, panel)
        .unwrap()
}

#[test]
fn test_weekend_renders_once_per_span() {
    let dir = tempfile::tempdir().unwrap();
    let store = status_file(dir.path(), "working");
    let mut panel = MockPanel::new(250, 122);
    let state = panel.state();

    let first = invoke(FixedClock::at(SATURDAY, 10, 0), &store, &mut panel);
    assert_eq!(first.to_string(), "It's the weekend!");
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "weekend");

    for (day, hour) in [(SATURDAY, 23), (SUNDAY, 3), (SUNDAY, 18)] {
        let again = invoke(FixedClock::at(day, hour, 30), &store, &mut panel);
        assert_eq!(again, Outcome::Skipped { state: DisplayState::Weekend, token: "weekend" });
    }

    assert_eq!(state.lock().unwrap().show_count, 1);
}

#[test]
fn test_off_hours_renders_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = status_file(dir.path(), "weekend");
    let mut panel = MockPanel::new(250, 122);

    let first = invoke(FixedClock::at(WEDNESDAY, 8, 0), &store, &mut panel);
    assert!(first.rendered());
    assert_eq!(first.to_string(), "It's not work time now");
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "not working");

    let second = invoke(FixedClock::at(WEDNESDAY, 8, 0), &store, &mut panel);
    assert!(!second.rendered());
    assert_eq!(second.to_string(), "No change (not working), display left untouched");

    assert_eq!(panel.state().lock().unwrap().show_count, 1);
}

#[test]
fn test_working_phrase_and_marker() {
    let dir = tempfile::tempdir().unwrap();
    let store = status_file(dir.path(), "not working\n");
    let mut panel = MockPanel::new(250, 122);

    let out = invoke(FixedClock::at(WEDNESDAY, 14, 27), &store, &mut panel);
    assert_eq!(out.state(), DisplayState::Working);
    assert_eq!(out.to_string(), "It's twenty-five past two ish");
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "working");

    let out = invoke(FixedClock::at(WEDNESDAY, 14, 40), &store, &mut panel);
    assert_eq!(out.to_string(), "It's twenty to three ish");

    let s = panel.state();
    let s = s.lock().unwrap();
    assert_eq!(s.show_count, 2);
    // working text is all black
    assert_eq!(s.last_shown.as_ref().unwrap().count(InkColor::Red), 0);
}

#[test]
fn test_day_rolls_from_work_to_evening_to_weekend() {
    let dir = tempfile::tempdir().unwrap();
    let store = status_file(dir.path(), "");
    let mut panel = MockPanel::new(250, 122);

    let friday = 4;
    let states: Vec<_> = [(friday, 16, 55), (friday, 17, 0), (friday, 22, 0), (SATURDAY, 0, 5)]
        .into_iter()
        .map(|(d, h, m)| invoke(FixedClock::at(d, h, m), &store, &mut panel))
        .map(|o| (o.state(), o.rendered()))
        .collect();

    assert_eq!(states, [
        (DisplayState::Working, true),
        (DisplayState::OffHours, true),
        (DisplayState::OffHours, false),
        (DisplayState::Weekend, true),
    ]);
}

#[test]
fn test_refused_rotation_keeps_marker_and_retries() {
    let dir = tempfile::tempdir().unwrap();
    let store = status_file(dir.path(), "working");
    let mut panel = MockPanel::new(250, 122);
    let clock = WordClock::new(FixedClock::at(SATURDAY, 10, 0), ScheduleConfig::default(), 45);

    for _ in 0..2 {
        let mut gate = StatusGate::open(store.clone()).unwrap();
        assert!(clock.run_once(&mut gate, &mut panel).is_err());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "working");
    }

    // once the rotation is fixed the weekend still gets drawn
    let out = invoke(FixedClock::at(SATURDAY, 10, 5), &store, &mut panel);
    assert_eq!(out.to_string(), "It's the weekend!");
    assert_eq!(panel.state().lock().unwrap().show_count, 1);
}

#[test]
fn test_missing_status_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStatusStore::new(dir.path().join("absent"));
    assert!(matches!(StatusGate::open(store), Err(StorageError::Missing(_))));
}

#[test]
fn test_netpbm_panel_writes_rotated_image() {
    let dir = tempfile::tempdir().unwrap();
    let store = status_file(dir.path(), "");
    let out = dir.path().join("frames").join("clock.ppm");
    let mut panel = NetpbmPanel::new(&out, 250, 122, Palette::BlackWhiteRed);

    let mut gate = StatusGate::open(store).unwrap();
    WordClock::new(FixedClock::at(WEDNESDAY, 20, 0), ScheduleConfig::default(), 90)
        .run_once(&mut gate, &mut panel)
        .unwrap();

    let bytes = fs::read(&out).unwrap();
    // portrait after a quarter turn, plus the bezel
    assert!(bytes.starts_with(b"P6\n130 258\n255\n"));
}
