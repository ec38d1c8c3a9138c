//! Calendar-day identifiers
//!
//! Completions are tracked at day granularity. Days serialize as `YYYY-MM-DD`;
//! the `Fri Oct 16 2026` form written by older exports is accepted on input.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::HabitError;

const ISO_FORMAT: &str = "%Y-%m-%d";
const LEGACY_FORMAT: &str = "%a %b %d %Y";

/// A single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a day from year/month/day parts (None if the date does not exist)
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the local timezone.
    ///
    /// Only front ends call this; core operations take the day as a parameter.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The day before this one
    pub fn yesterday(&self) -> Self {
        Self(self.0.checked_sub_days(Days::new(1)).unwrap_or(self.0))
    }

    /// The day after this one
    pub fn next(&self) -> Self {
        Self(self.0.checked_add_days(Days::new(1)).unwrap_or(self.0))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for Day {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, ISO_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(s, LEGACY_FORMAT))
            .map(Self)
            .map_err(|_| HabitError::Format(format!("invalid day identifier: {s:?}")))
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
