use crate::assessment::{AssessmentInput, AssessmentResult};
use crate::calendar::DayKey;
use crate::planner::Focus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ===================================================================
// Document root
// ===================================================================

/// Everything the tracker persists, stored as one JSON document.
///
/// Every section falls back to its defaults when missing, so documents
/// written by older versions (or trimmed by hand) still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub settings: Settings,
    pub profile: Profile,
    pub diagnostic: Diagnostic,
    pub plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<DailySession>,
    pub streak: StreakState,
}

// ===================================================================
// Settings (plan configuration)
// ===================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub daily_minutes: u32,
    pub weekend_minutes: u32,
    /// Display-only; not used when generating plans.
    pub target_date: Option<DayKey>,
    pub links: Links,
}

pub const DEFAULT_DAILY_MINUTES: u32 = 30;
pub const DEFAULT_WEEKEND_MINUTES: u32 = 120;

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_minutes: DEFAULT_DAILY_MINUTES,
            weekend_minutes: DEFAULT_WEEKEND_MINUTES,
            target_date: None,
            links: Links::default(),
        }
    }
}

/// Three free-form resource link slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub link1: String,
    pub link2: String,
    pub link3: String,
}

impl Links {
    /// First non-blank link, in slot order.
    pub fn first(&self) -> Option<&str> {
        [&self.link1, &self.link2, &self.link3]
            .into_iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
    }
}

// ===================================================================
// Profile
// ===================================================================

/// Which area the learner finds hardest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardArea {
    Reading,
    Grammar,
    #[default]
    Both,
}

impl FromStr for HardArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reading" => Ok(HardArea::Reading),
            "grammar" => Ok(HardArea::Grammar),
            "both" => Ok(HardArea::Both),
            other => Err(format!(
                "unknown area `{other}` (expected reading, grammar or both)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Topics of interest, free text.
    pub themes: String,
    pub hard: HardArea,
}

// ===================================================================
// Diagnostic
// ===================================================================

/// The latest assessment: coerced inputs plus the evaluator's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Diagnostic {
    pub scores: AssessmentInput,
    pub result: Option<AssessmentResult>,
    pub last_run_at: Option<DateTime<Utc>>,
}

// ===================================================================
// Plan
// ===================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plan {
    pub generated_at: Option<DateTime<Utc>>,
    pub structure: Vec<String>,
    pub sessions: Vec<Session>,
}

/// One scheduled day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub index: u32,
    pub date: DayKey,
    #[serde(default)]
    pub focus: Focus,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Cached check-in session for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySession {
    pub date_key: DayKey,
    #[serde(default)]
    pub focus: Focus,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub done: bool,
}

// ===================================================================
// Streak
// ===================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreakState {
    pub count: u32,
    pub last_done_date_key: Option<DayKey>,
}

#[cfg(test)]
mod tests;
