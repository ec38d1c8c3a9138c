//! Persistence of the habit list and player state
//!
//! State lives in two independent JSON documents, `habits` and `player`,
//! each carrying a `version` field. Unversioned documents (a bare habit
//! array, a bare player object) are still accepted on load.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

pub(crate) use file::write_atomic;

use serde::{Deserialize, Serialize};

use crate::domain::{Habit, PlayerState};
use crate::HabitError;

/// Current version of the persisted documents
pub const DOCUMENT_VERSION: u32 = 1;

/// Backend that holds the persisted documents.
///
/// Absent documents load as an empty list / fresh player. Writes are
/// all-or-nothing per call.
pub trait Storage {
    fn load_habits(&self) -> Result<Vec<Habit>, HabitError>;
    fn load_player(&self) -> Result<PlayerState, HabitError>;
    fn save_habits(&mut self, habits: &[Habit]) -> Result<(), HabitError>;
    fn save_player(&mut self, player: &PlayerState) -> Result<(), HabitError>;
    /// Remove every persisted document
    fn clear(&mut self) -> Result<(), HabitError>;
}

#[derive(Serialize)]
struct HabitsDocumentRef<'a> {
    version: u32,
    habits: &'a [Habit],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HabitsDocument {
    Versioned { version: u32, habits: Vec<Habit> },
    Bare(Vec<Habit>),
}

#[derive(Serialize, Deserialize)]
struct PlayerDocument {
    #[serde(default)]
    version: u32,
    #[serde(flatten)]
    player: PlayerState,
}

pub(crate) fn encode_habits(habits: &[Habit]) -> Result<String, HabitError> {
    let doc = HabitsDocumentRef {
        version: DOCUMENT_VERSION,
        habits,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub(crate) fn decode_habits(content: &str) -> Result<Vec<Habit>, HabitError> {
    match serde_json::from_str(content)? {
        HabitsDocument::Versioned { version, habits } => {
            check_version(version)?;
            Ok(habits)
        }
        HabitsDocument::Bare(habits) => Ok(habits),
    }
}

pub(crate) fn encode_player(player: &PlayerState) -> Result<String, HabitError> {
    let doc = PlayerDocument {
        version: DOCUMENT_VERSION,
        player: player.clone(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub(crate) fn decode_player(content: &str) -> Result<PlayerState, HabitError> {
    let doc: PlayerDocument = serde_json::from_str(content)?;
    check_version(doc.version)?;
    Ok(doc.player)
}

pub(crate) fn check_version(version: u32) -> Result<(), HabitError> {
    if version > DOCUMENT_VERSION {
        return Err(HabitError::Format(format!(
            "document version {version} is newer than supported version {DOCUMENT_VERSION}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_habit_array() {
        let content = r#"[{
            "id": "1718000000000",
            "name": "Drink water",
            "category": "health",
            "difficulty": "easy",
            "xp": 10,
            "createdAt": "2026-10-01T08:00:00.000Z",
            "streak": 2,
            "bestStreak": 5,
            "completedDates": ["Wed Oct 14 2026", "Thu Oct 15 2026"],
            "lastCompleted": "Thu Oct 15 2026"
        }]"#;
        let habits = decode_habits(content).unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].id.as_str(), "1718000000000");
        assert_eq!(habits[0].completed_dates.len(), 2);
        assert_eq!(habits[0].last_completed.unwrap().to_string(), "2026-10-15");
    }

    #[test]
    fn test_player_document_keeps_flat_keys() {
        let player = PlayerState {
            level: 3,
            xp: 40,
            total_xp: 290,
        };
        let encoded = encode_player(&player).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], DOCUMENT_VERSION);
        assert_eq!(value["totalXp"], 290);
        assert_eq!(decode_player(&encoded).unwrap(), player);

        let legacy = r#"{"level": 2, "xp": 5, "totalXp": 105}"#;
        assert_eq!(decode_player(legacy).unwrap().level, 2);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let content = r#"{"version": 99, "habits": []}"#;
        assert!(matches!(decode_habits(content), Err(HabitError::Format(_))));
    }

    #[test]
    fn test_garbage_is_format_error() {
        assert!(matches!(decode_habits("not json"), Err(HabitError::Format(_))));
        assert!(matches!(decode_player("[]"), Err(HabitError::Format(_))));
    }
}
