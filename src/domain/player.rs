//! XP and level progression
//!
//! Each level needs `100 + (level - 1) * 50` XP; progress resets to the
//! remainder when a level is gained.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::HabitError;

/// XP needed to clear `level` (level 0 is treated as level 1)
pub fn xp_needed_for_level(level: u32) -> u32 {
    level
        .max(1)
        .saturating_sub(1)
        .saturating_mul(50)
        .saturating_add(100)
}

/// How an award that crosses more than one threshold is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelingPolicy {
    /// At most one level-up per award; leftover XP stays in the meter
    #[default]
    SingleStep,
    /// Keep levelling until the meter is below the current threshold
    Cascade,
}

impl LevelingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleStep => "single-step",
            Self::Cascade => "cascade",
        }
    }
}

impl fmt::Display for LevelingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelingPolicy {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single-step" => Ok(Self::SingleStep),
            "cascade" => Ok(Self::Cascade),
            other => Err(HabitError::Validation(format!(
                "unknown leveling policy: {other}"
            ))),
        }
    }
}

/// Player progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub level: u32,
    /// Progress within the current level
    pub xp: u32,
    /// Lifetime XP
    pub total_xp: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_xp: 0,
        }
    }
}

/// Outcome of a single XP award
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpAward {
    pub amount: u32,
    pub old_level: u32,
    pub new_level: u32,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

impl PlayerState {
    /// XP needed to clear the current level
    pub fn xp_needed(&self) -> u32 {
        xp_needed_for_level(self.level)
    }

    /// Add XP and apply level-ups according to `policy`
    pub fn award_xp(&mut self, amount: u32, policy: LevelingPolicy) -> XpAward {
        let old_level = self.level;
        self.xp = self.xp.saturating_add(amount);
        self.total_xp = self.total_xp.saturating_add(u64::from(amount));

        loop {
            let needed = self.xp_needed();
            if self.xp < needed {
                break;
            }
            let Some(next_level) = self.level.checked_add(1) else {
                break;
            };
            self.level = next_level;
            self.xp -= needed;
            if policy == LevelingPolicy::SingleStep {
                break;
            }
        }

        XpAward {
            amount,
            old_level,
            new_level: self.level,
        }
    }

    /// Progress through the current level (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        (self.xp as f32 / self.xp_needed() as f32).min(1.0)
    }

    /// Restore invariants on state that came from outside the store
    pub(crate) fn normalize(&mut self) {
        self.level = self.level.max(1);
    }
}
