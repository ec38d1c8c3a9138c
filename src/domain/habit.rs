//! Habit records and their fixed lookup tables

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::day::Day;
use crate::HabitError;

/// Opaque habit identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HabitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Habit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Productivity,
    Learning,
    Mindfulness,
    Social,
    Creative,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Health,
        Self::Productivity,
        Self::Learning,
        Self::Mindfulness,
        Self::Social,
        Self::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Productivity => "productivity",
            Self::Learning => "learning",
            Self::Mindfulness => "mindfulness",
            Self::Social => "social",
            Self::Creative => "creative",
        }
    }

    /// Capitalized display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Productivity => "Productivity",
            Self::Learning => "Learning",
            Self::Mindfulness => "Mindfulness",
            Self::Social => "Social",
            Self::Creative => "Creative",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Health => "🏃",
            Self::Productivity => "💼",
            Self::Learning => "📚",
            Self::Mindfulness => "🧘",
            Self::Social => "👥",
            Self::Creative => "🎨",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HabitError::Validation(format!("unknown category: {s}")))
    }
}

/// Habit difficulty, which fixes the XP reward per completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// XP granted for one completion
    pub fn xp(&self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 30,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| HabitError::Validation(format!("unknown difficulty: {s}")))
    }
}

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Reward per completion, fixed when the difficulty is set
    pub xp: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    /// Days this habit was completed, in completion order, without duplicates
    #[serde(default)]
    pub completed_dates: Vec<Day>,
    #[serde(default)]
    pub last_completed: Option<Day>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Habit {
    /// Create a fresh habit. `name` must already be trimmed and non-empty.
    pub(crate) fn new(name: String, category: Category, difficulty: Difficulty) -> Self {
        Self {
            id: HabitId::generate(),
            name,
            category,
            difficulty,
            xp: difficulty.xp(),
            streak: 0,
            best_streak: 0,
            completed_dates: Vec::new(),
            last_completed: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_completed_on(&self, day: Day) -> bool {
        self.completed_dates.contains(&day)
    }

    /// Record a completion on `today` and recompute the streak.
    ///
    /// Returns false (and changes nothing) if `today` was already recorded.
    pub(crate) fn record_completion(&mut self, today: Day) -> bool {
        if self.is_completed_on(today) {
            return false;
        }
        self.completed_dates.push(today);
        self.last_completed = Some(today);
        self.update_streak(today);
        true
    }

    /// Streak continues only if yesterday (relative to `today`) was completed too
    fn update_streak(&mut self, today: Day) {
        if self.is_completed_on(today) && self.is_completed_on(today.yesterday()) {
            self.streak += 1;
        } else {
            self.streak = 1;
        }
        self.best_streak = self.best_streak.max(self.streak);
    }

    /// Restore invariants on records that came from outside the store.
    ///
    /// Drops repeated days (keeping first occurrence) and lifts `best_streak`
    /// to at least `streak`. Records that already hold are left untouched.
    /// A blank name cannot be repaired and is a format error.
    pub(crate) fn normalize(&mut self) -> Result<(), HabitError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(HabitError::Format(format!("habit {} has an empty name", self.id)));
        }
        self.name = name.to_string();

        let mut seen = std::collections::HashSet::new();
        self.completed_dates.retain(|day| seen.insert(*day));
        self.best_streak = self.best_streak.max(self.streak);
        Ok(())
    }
}
