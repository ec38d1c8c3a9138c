//! LevelUp Habits - an RPG-style habit tracker
//!
//! Habits are completed at most once per calendar day. Every completion
//! extends (or restarts) the habit's streak and awards XP according to the
//! habit's difficulty; XP fills a level meter whose size grows by 50 per level.
//!
//! ## Layers
//!
//! 1. [`HabitStore`]: in-memory state and all domain rules. The current day
//!    is always passed in, so the rules are deterministic.
//! 2. [`storage`]: the [`Storage`] trait with JSON file and in-memory backends.
//! 3. [`Tracker`]: runs store operations and writes the result through to storage.
//!
//! ```ignore
//! let storage = JsonFileStorage::new(config.data_dir());
//! let mut tracker = Tracker::open(storage, config.settings.leveling)?;
//! let habit = tracker.create_habit("Read 20 pages", Category::Learning, Difficulty::Medium)?;
//! let result = tracker.complete_habit(&habit.id, Day::today())?;
//! ```

pub mod backup;
pub mod config;
pub mod domain;
mod error;
pub mod storage;
pub mod store;
mod tracker;

pub use backup::Backup;
pub use domain::*;
pub use error::HabitError;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::{CompletionResult, HabitStore, HabitUpdate, Summary};
pub use tracker::{Confirmation, Tracker};
