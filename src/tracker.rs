//! Write-through habit tracking session
//!
//! Couples a [`HabitStore`] with a [`Storage`] backend: every mutation is
//! applied in memory first, then the affected documents are written. A failed
//! write is returned to the caller with the mutation still applied in memory,
//! so [`Tracker::save`] can retry it.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::backup::Backup;
use crate::domain::{Category, Day, Difficulty, Habit, HabitId, LevelingPolicy};
use crate::storage::Storage;
use crate::store::{CompletionResult, HabitStore, HabitUpdate};
use crate::HabitError;

/// Caller's answer to a destructive-operation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Habit store with persistence
pub struct Tracker<S: Storage> {
    store: HabitStore,
    storage: S,
}

impl<S: Storage> Tracker<S> {
    /// Load persisted state from `storage`
    pub fn open(storage: S, policy: LevelingPolicy) -> Result<Self, HabitError> {
        let habits = storage.load_habits()?;
        let player = storage.load_player()?;
        debug!(habits = habits.len(), level = player.level, "Loaded tracker state");

        Ok(Self {
            store: HabitStore::from_parts(habits, player)?.with_policy(policy),
            storage,
        })
    }

    /// Read-only view of the current state
    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Resolve a full id or unique id prefix
    pub fn resolve_id(&self, query: &str) -> Result<HabitId, HabitError> {
        self.store.resolve_id(query)
    }

    pub fn create_habit(
        &mut self,
        name: &str,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<Habit, HabitError> {
        let habit = self.store.create_habit(name, category, difficulty)?.clone();
        info!(id = %habit.id, name = %habit.name, "New habit created");
        self.storage.save_habits(self.store.habits())?;
        Ok(habit)
    }

    pub fn update_habit(&mut self, id: &HabitId, update: HabitUpdate) -> Result<Habit, HabitError> {
        let habit = self.store.update_habit(id, update)?.clone();
        info!(id = %habit.id, name = %habit.name, "Habit updated");
        self.storage.save_habits(self.store.habits())?;
        Ok(habit)
    }

    pub fn delete_habit(&mut self, id: &HabitId) -> Result<Habit, HabitError> {
        let habit = self.store.delete_habit(id)?;
        info!(id = %habit.id, name = %habit.name, "Habit deleted");
        self.storage.save_habits(self.store.habits())?;
        Ok(habit)
    }

    pub fn complete_habit(&mut self, id: &HabitId, today: Day) -> Result<CompletionResult, HabitError> {
        let result = self.store.complete_habit(id, today)?;
        if result.already_completed {
            debug!(id = %id, day = %today, "Habit already completed today");
            return Ok(result);
        }

        info!(id = %id, xp = result.xp_awarded, streak = result.new_streak, "Quest completed");
        if let Some(level) = result.new_level {
            info!(level, "Level up");
        }
        self.save()?;
        Ok(result)
    }

    /// Snapshot the whole state for a backup
    pub fn export(&self, exported_at: DateTime<Utc>) -> Backup {
        Backup::capture(&self.store, exported_at)
    }

    /// Replace the whole state with a backup document
    pub fn import_json(&mut self, content: &str) -> Result<&HabitStore, HabitError> {
        let backup = Backup::from_json(content)?;
        info!(
            habits = backup.habits.len(),
            exported = %backup.export_date,
            "Importing backup"
        );
        backup.restore_into(&mut self.store)?;
        self.save()?;
        Ok(&self.store)
    }

    /// Delete all persisted state and start over.
    ///
    /// Nothing happens unless `confirmation` is [`Confirmation::Confirmed`].
    pub fn reset(&mut self, confirmation: Confirmation) -> Result<(), HabitError> {
        if confirmation != Confirmation::Confirmed {
            return Err(HabitError::Unconfirmed);
        }
        self.storage.clear()?;
        self.store.clear();
        info!("All habit data reset");
        Ok(())
    }

    /// Write both documents
    pub fn save(&mut self) -> Result<(), HabitError> {
        self.storage.save_habits(self.store.habits())?;
        self.storage.save_player(self.store.player())
    }
}
