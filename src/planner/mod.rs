use crate::assessment::{self, AssessmentResult};
use crate::calendar::DayKey;
use crate::types::{DailySession, Plan, Session, Settings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ===================================================================
// Focus rotation
// ===================================================================

/// Topic of a study session. Sessions walk [`Focus::CYCLE`] in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    Grammar,
    Vocabulary,
    Writing,
    Speaking,
    Reading,
    Listening,
}

impl Focus {
    pub const CYCLE: [Focus; 6] = [
        Focus::Grammar,
        Focus::Vocabulary,
        Focus::Writing,
        Focus::Speaking,
        Focus::Reading,
        Focus::Listening,
    ];

    /// Focus for position `index` in the rotation. Negative indices wrap.
    pub fn at(index: i64) -> Focus {
        Self::CYCLE[index.rem_euclid(Self::CYCLE.len() as i64) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Grammar => "Grammar",
            Focus::Vocabulary => "Vocabulary",
            Focus::Writing => "Writing",
            Focus::Speaking => "Speaking",
            Focus::Reading => "Reading",
            Focus::Listening => "Listening",
        }
    }

    /// The two focus-specific tasks appended after the baseline.
    pub fn tasks(self) -> [&'static str; 2] {
        match self {
            Focus::Grammar => [
                "Grammar: subjunctive, participle agreement, relative pronouns.",
                "Mini production: 6 sentences using connectors (however, whereas, therefore...).",
            ],
            Focus::Vocabulary => [
                "Lexis: academic words for cause/consequence, nuance, concession.",
                "Speaking: 2 minutes summarising an economics topic in plain words.",
            ],
            Focus::Writing => [
                "Writing: 120-180 words (opinion + 2 arguments + example).",
                "Proofreading: check agreement, connectors and word choice.",
            ],
            Focus::Speaking => [
                "Speaking: 3-part outline with transitions (first/then/finally).",
                "Paraphrase: say the same idea in 3 different ways.",
            ],
            Focus::Reading => [
                "Reading: 1 short article, highlight connectors and implicit meaning.",
                "Paraphrase: rewrite 5 sentences from the text in your own words.",
            ],
            Focus::Listening => [
                "Listening: 5-10 min of audio, note 8 new words.",
                "Spoken summary: 60-90 seconds + 2 paraphrases.",
            ],
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ===================================================================
// Task assembly
// ===================================================================

/// Number of calendar days covered by a generated plan.
pub const PLAN_DAYS: u32 = 30;

const SHORT_BONUS_MINUTES: u32 = 45;
const LONG_BONUS_MINUTES: u32 = 120;
const MAX_PRIORITY_LINES: usize = 2;

const BASELINE_TASKS: [&str; 3] = [
    "10 min: vocabulary review (list/flashcards) + 5 words + 2 sentences.",
    "10 min: grammar drill (agreement / pronouns / subjunctive) + 5 examples.",
    "10 min: paraphrase drill (2 sentences, 2 rewordings each).",
];

const SHORT_BONUS_TASK: &str = "Bonus 10 min: 1 grammar exercise + self-correction.";
const LONG_BONUS_TASK: &str =
    "Weekend bonus: 200-word essay + self-correction (agreement/connectors).";

/// Build the ordered task list for one session.
///
/// Order: up to two priority lines, the baseline drills, the focus pair,
/// any duration bonuses, then the resource line.
pub fn build_tasks(
    focus: Focus,
    minutes: u32,
    priorities: &[String],
    resource: Option<&str>,
) -> Vec<String> {
    let mut tasks: Vec<String> = priorities
        .iter()
        .take(MAX_PRIORITY_LINES)
        .map(|p| format!("Priority: {p}"))
        .collect();

    tasks.extend(BASELINE_TASKS.iter().map(|t| t.to_string()));
    tasks.extend(focus.tasks().iter().map(|t| t.to_string()));

    if minutes >= SHORT_BONUS_MINUTES {
        tasks.push(SHORT_BONUS_TASK.to_string());
    }
    if minutes >= LONG_BONUS_MINUTES {
        tasks.push(LONG_BONUS_TASK.to_string());
    }

    tasks.push(match resource {
        Some(link) => format!("Resource: {link}"),
        None => "Resource: (add your links with `settings set --link1`)".to_string(),
    });
    tasks
}

/// Priorities from the latest assessment, or the defaults if none has run.
fn effective_priorities(assessment: Option<&AssessmentResult>) -> Vec<String> {
    match assessment {
        Some(r) if !r.priorities.is_empty() => r.priorities.clone(),
        _ => assessment::fallback_priorities(),
    }
}

fn minutes_for(day: DayKey, settings: &Settings) -> u32 {
    if day.is_weekend() {
        settings.weekend_minutes
    } else {
        settings.daily_minutes
    }
}

// ===================================================================
// Plan generation
// ===================================================================

/// Generate a fresh [`PLAN_DAYS`]-day plan starting at `start`.
///
/// Pure: the same arguments always produce the same plan. Callers replace
/// any stored plan wholesale with the result.
pub fn generate(
    assessment: Option<&AssessmentResult>,
    settings: &Settings,
    start: DayKey,
    now: DateTime<Utc>,
) -> Plan {
    let priorities = effective_priorities(assessment);
    let resource = settings.links.first();

    let sessions = (0..PLAN_DAYS)
        .map(|index| {
            let date = start.add_days(i64::from(index));
            let focus = Focus::at(i64::from(index));
            let duration_minutes = minutes_for(date, settings);
            Session {
                index,
                date,
                focus,
                duration_minutes,
                tasks: build_tasks(focus, duration_minutes, &priorities, resource),
            }
        })
        .collect();

    Plan {
        generated_at: Some(now),
        structure: structure(settings),
        sessions,
    }
}

/// Three summary lines describing the weekly rhythm.
pub fn structure(settings: &Settings) -> Vec<String> {
    vec![
        format!(
            "Mon-Fri ({}): 1 grammar block + 1 vocabulary block + 1 short production (written/spoken).",
            format_minutes(settings.daily_minutes)
        ),
        format!(
            "Weekend ({}): comprehension (audio/text) + long production + correction + paraphrase.",
            format_minutes(settings.weekend_minutes)
        ),
        "Every day: 10 min review (flashcards/lists) + 1 connector + 2 paraphrases.".to_string(),
    ]
}

/// Today's check-in session. The focus follows the day's position in the
/// rotation counted from 1970-01-01, so it does not depend on when the
/// plan was generated.
pub fn daily_session(
    assessment: Option<&AssessmentResult>,
    settings: &Settings,
    today: DayKey,
) -> DailySession {
    let focus = Focus::at(today.epoch_index());
    let duration_minutes = minutes_for(today, settings);
    let priorities = effective_priorities(assessment);
    DailySession {
        date_key: today,
        focus,
        duration_minutes,
        tasks: build_tasks(focus, duration_minutes, &priorities, settings.links.first()),
        done: false,
    }
}

/// Return the cached session if it belongs to `today`, otherwise a freshly
/// computed one. A session for another day is never reused.
pub fn refresh_daily(
    cached: Option<DailySession>,
    assessment: Option<&AssessmentResult>,
    settings: &Settings,
    today: DayKey,
) -> DailySession {
    match cached {
        Some(s) if s.date_key == today => s,
        _ => daily_session(assessment, settings, today),
    }
}

/// Human-readable duration: `45 min`, `2 h`, `1 h 30 min`.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let (h, m) = (minutes / 60, minutes % 60);
    if m == 0 {
        format!("{h} h")
    } else {
        format!("{h} h {m} min")
    }
}

#[cfg(test)]
mod tests;
