use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day with no time-of-day or timezone attached.
///
/// Serialized as `YYYY-MM-DD`. All streak and scheduling arithmetic is done
/// on whole days so that "tomorrow" never depends on when in the day the
/// user happens to run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

const FORMAT: &str = "%Y-%m-%d";

impl DayKey {
    /// The current local calendar day.
    pub fn today_local() -> Self {
        DayKey(chrono::Local::now().date_naive())
    }

    /// Add `days` whole calendar days (may be negative). A result outside
    /// chrono's supported range leaves the day unchanged.
    pub fn add_days(self, days: i64) -> Self {
        let delta = chrono::Duration::days(days);
        DayKey(self.0.checked_add_signed(delta).unwrap_or(self.0))
    }

    pub fn add_months(self, months: u32) -> Self {
        DayKey(
            self.0
                .checked_add_months(Months::new(months))
                .unwrap_or(self.0),
        )
    }

    pub fn is_weekend(self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: DayKey) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// True when `self` is exactly one calendar day after `other`.
    pub fn is_day_after(self, other: DayKey) -> bool {
        self.days_since(other) == 1
    }

    /// Days since 1970-01-01. Used to rotate daily content deterministically.
    pub fn epoch_index(self) -> i64 {
        self.days_since(DayKey(NaiveDate::default()))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), FORMAT).map(DayKey)
    }
}
