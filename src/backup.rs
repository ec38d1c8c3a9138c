//! Backup documents
//!
//! A backup bundles the whole state into one JSON document:
//!
//! ```json
//! { "version": 1, "habits": [...], "playerData": {...}, "exportDate": "2026-10-16T09:30:00Z" }
//! ```
//!
//! Importing a backup replaces the current state wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Day, Habit, PlayerState};
use crate::storage::{check_version, DOCUMENT_VERSION};
use crate::{HabitError, HabitStore};

/// Full snapshot of a store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: u32,
    pub habits: Vec<Habit>,
    pub player_data: PlayerState,
    pub export_date: DateTime<Utc>,
}

/// Lenient input shape so missing sections get a clear error
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBackup {
    #[serde(default)]
    version: u32,
    habits: Option<Vec<Habit>>,
    player_data: Option<PlayerState>,
    export_date: Option<DateTime<Utc>>,
}

impl Backup {
    /// Snapshot `store` as of `exported_at`
    pub fn capture(store: &HabitStore, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            habits: store.habits().to_vec(),
            player_data: store.player().clone(),
            export_date: exported_at,
        }
    }

    pub fn to_json(&self) -> Result<String, HabitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a backup document.
    ///
    /// Fails with [`HabitError::Format`] if the text is not JSON or lacks the
    /// habit list or the player data. A missing export date falls back to now.
    pub fn from_json(content: &str) -> Result<Self, HabitError> {
        let raw: RawBackup = serde_json::from_str(content)?;
        check_version(raw.version)?;

        let (habits, player_data) = match (raw.habits, raw.player_data) {
            (Some(habits), Some(player)) => (habits, player),
            (None, Some(_)) => return Err(missing("habits")),
            (Some(_), None) => return Err(missing("playerData")),
            (None, None) => return Err(missing("habits and playerData")),
        };

        Ok(Self {
            version: DOCUMENT_VERSION,
            habits,
            player_data,
            export_date: raw.export_date.unwrap_or_else(Utc::now),
        })
    }

    /// Replace the contents of `store` with this backup.
    ///
    /// `store` is left as it was if any habit is invalid.
    pub fn restore_into(self, store: &mut HabitStore) -> Result<(), HabitError> {
        store.replace_all(self.habits, self.player_data)
    }
}

/// Suggested file name for a backup taken on `day`
pub fn default_file_name(day: Day) -> String {
    format!("levelup-habits-backup-{day}.json")
}

fn missing(what: &str) -> HabitError {
    HabitError::Format(format!("backup is missing {what}"))
}
