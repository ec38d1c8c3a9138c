//! Volatile storage backend

use std::io;

use super::{decode_habits, decode_player, encode_habits, encode_player, Storage};
use crate::domain::{Habit, PlayerState};
use crate::HabitError;

/// Keeps the serialized documents in memory, the way a browser's key/value
/// storage would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    habits: Option<String>,
    player: Option<String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a persistence error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw habits document, if one was written
    pub fn habits_document(&self) -> Option<&str> {
        self.habits.as_deref()
    }

    /// Raw player document, if one was written
    pub fn player_document(&self) -> Option<&str> {
        self.player.as_deref()
    }

    fn check_writable(&self, key: &str) -> Result<(), HabitError> {
        if self.fail_writes {
            return Err(HabitError::persistence(
                key,
                io::Error::other("storage is read-only"),
            ));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn load_habits(&self) -> Result<Vec<Habit>, HabitError> {
        self.habits.as_deref().map_or(Ok(Vec::new()), decode_habits)
    }

    fn load_player(&self) -> Result<PlayerState, HabitError> {
        self.player
            .as_deref()
            .map_or_else(|| Ok(PlayerState::default()), decode_player)
    }

    fn save_habits(&mut self, habits: &[Habit]) -> Result<(), HabitError> {
        self.check_writable("habits")?;
        self.habits = Some(encode_habits(habits)?);
        Ok(())
    }

    fn save_player(&mut self, player: &PlayerState) -> Result<(), HabitError> {
        self.check_writable("player")?;
        self.player = Some(encode_player(player)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HabitError> {
        self.check_writable("habits")?;
        self.habits = None;
        self.player = None;
        Ok(())
    }
}
