//! Core domain types

mod day;
mod habit;
mod player;

pub use day::Day;
pub use habit::{Category, Difficulty, Habit, HabitId};
pub use player::{xp_needed_for_level, LevelingPolicy, PlayerState, XpAward};
