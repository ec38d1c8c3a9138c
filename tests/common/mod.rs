//! Shared test utilities for tracker integration tests

#![allow(dead_code)]

use levelup::{Day, JsonFileStorage, LevelingPolicy, Tracker};
use tempfile::TempDir;

/// Day `d` of October 2026
pub fn oct(d: u32) -> Day {
    Day::from_ymd(2026, 10, d).expect("valid day")
}

/// Creates a tracker on a fresh temporary data directory
pub fn file_tracker() -> (TempDir, Tracker<JsonFileStorage>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let tracker = reopen(&temp_dir);
    (temp_dir, tracker)
}

/// Opens a new tracker on an existing data directory
pub fn reopen(dir: &TempDir) -> Tracker<JsonFileStorage> {
    Tracker::open(JsonFileStorage::new(dir.path()), LevelingPolicy::SingleStep)
        .expect("Failed to open tracker")
}
