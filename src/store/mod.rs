//! In-memory habit collection and player progression
//!
//! `HabitStore` is the only mutation surface for habits and XP. It never
//! touches storage or the clock: callers pass the current day in and persist
//! the snapshots afterwards (see [`crate::Tracker`]).

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{Category, Day, Difficulty, Habit, HabitId, LevelingPolicy, PlayerState, XpAward};
use crate::HabitError;

/// Fields to change on an existing habit (`None` leaves the field as is)
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.difficulty.is_none()
    }
}

/// Outcome of completing a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub habit_id: HabitId,
    /// The day was already recorded; nothing changed
    pub already_completed: bool,
    pub xp_awarded: u32,
    pub new_streak: u32,
    pub leveled_up: bool,
    /// Set only when `leveled_up`
    pub new_level: Option<u32>,
}

/// Aggregate numbers for the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of all current streaks
    pub total_streak: u32,
    pub completed_today: usize,
    pub total_habits: usize,
}

/// Owns the habit list and player state
#[derive(Debug, Clone, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
    player: PlayerState,
    policy: LevelingPolicy,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted state
    pub fn from_parts(habits: Vec<Habit>, player: PlayerState) -> Result<Self, HabitError> {
        let mut store = Self::default();
        store.replace_all(habits, player)?;
        Ok(store)
    }

    pub fn with_policy(mut self, policy: LevelingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LevelingPolicy {
        self.policy
    }

    // ========================================
    // SNAPSHOTS
    // ========================================

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn summary(&self, today: Day) -> Summary {
        Summary {
            total_streak: self.habits.iter().map(|h| h.streak).sum(),
            completed_today: self.habits.iter().filter(|h| h.is_completed_on(today)).count(),
            total_habits: self.habits.len(),
        }
    }

    /// Find the habit whose id is `query` or starts with it.
    ///
    /// An exact match wins; otherwise the prefix must be unambiguous.
    pub fn resolve_id(&self, query: &str) -> Result<HabitId, HabitError> {
        let query = query.trim();
        if let Some(habit) = self.habits.iter().find(|h| h.id.as_str() == query) {
            return Ok(habit.id.clone());
        }
        if query.is_empty() {
            return Err(HabitError::NotFound(String::new()));
        }

        let mut matches = self.habits.iter().filter(|h| h.id.as_str().starts_with(query));
        match (matches.next(), matches.next()) {
            (Some(habit), None) => Ok(habit.id.clone()),
            (Some(_), Some(_)) => Err(HabitError::Validation(format!(
                "id prefix {query:?} matches more than one habit"
            ))),
            (None, _) => Err(HabitError::NotFound(query.to_string())),
        }
    }

    // ========================================
    // HABIT OPERATIONS
    // ========================================

    /// Create and append a new habit
    pub fn create_habit(
        &mut self,
        name: &str,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<&Habit, HabitError> {
        let name = validate_name(name)?;
        self.habits.push(Habit::new(name, category, difficulty));
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Merge `update` into an existing habit.
    ///
    /// Streak and history fields are never touched. XP is re-derived only
    /// when a difficulty is supplied.
    pub fn update_habit(&mut self, id: &HabitId, update: HabitUpdate) -> Result<&Habit, HabitError> {
        let index = self.index_of(id)?;
        let name = update.name.as_deref().map(validate_name).transpose()?;

        let habit = &mut self.habits[index];
        if let Some(name) = name {
            habit.name = name;
        }
        if let Some(category) = update.category {
            habit.category = category;
        }
        if let Some(difficulty) = update.difficulty {
            habit.difficulty = difficulty;
            habit.xp = difficulty.xp();
        }
        Ok(&self.habits[index])
    }

    /// Remove a habit, returning it
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<Habit, HabitError> {
        let index = self.index_of(id)?;
        Ok(self.habits.remove(index))
    }

    /// Mark a habit done for `today`, update its streak and award its XP
    pub fn complete_habit(&mut self, id: &HabitId, today: Day) -> Result<CompletionResult, HabitError> {
        let index = self.index_of(id)?;
        let habit = &mut self.habits[index];

        if !habit.record_completion(today) {
            return Ok(CompletionResult {
                habit_id: habit.id.clone(),
                already_completed: true,
                xp_awarded: 0,
                new_streak: habit.streak,
                leveled_up: false,
                new_level: None,
            });
        }

        let habit_id = habit.id.clone();
        let new_streak = habit.streak;
        let reward = habit.xp;
        let award = self.award_xp(reward);

        Ok(CompletionResult {
            habit_id,
            already_completed: false,
            xp_awarded: reward,
            new_streak,
            leveled_up: award.leveled_up(),
            new_level: award.leveled_up().then_some(award.new_level),
        })
    }

    // ========================================
    // XP & STATE OPERATIONS
    // ========================================

    /// Award XP to the player using the store's leveling policy
    pub fn award_xp(&mut self, amount: u32) -> XpAward {
        self.player.award_xp(amount, self.policy)
    }

    /// Swap in a complete new state (import). Invariants are restored on the way in.
    ///
    /// Fails with [`HabitError::Format`] on a blank habit name or a repeated id;
    /// the current state is kept in that case.
    pub fn replace_all(
        &mut self,
        mut habits: Vec<Habit>,
        mut player: PlayerState,
    ) -> Result<(), HabitError> {
        let mut ids = HashSet::new();
        for habit in &mut habits {
            habit.normalize()?;
            if !ids.insert(habit.id.clone()) {
                return Err(HabitError::Format(format!("duplicate habit id {}", habit.id)));
            }
        }
        player.normalize();

        self.habits = habits;
        self.player = player;
        Ok(())
    }

    /// Drop all habits and start a fresh player
    pub fn clear(&mut self) {
        self.habits.clear();
        self.player = PlayerState::default();
    }

    fn index_of(&self, id: &HabitId) -> Result<usize, HabitError> {
        self.habits
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| HabitError::NotFound(id.to_string()))
    }
}

fn validate_name(name: &str) -> Result<String, HabitError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HabitError::Validation("habit name must not be empty".to_string()));
    }
    Ok(name.to_string())
}
