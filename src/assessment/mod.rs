use serde::{Deserialize, Serialize};
use std::fmt;

// ===================================================================
// Skills and their score domains
// ===================================================================

/// The four assessed skills, in their fixed tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    Reading,
    Grammar,
    Writing,
    Listening,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Reading,
        Skill::Grammar,
        Skill::Writing,
        Skill::Listening,
    ];

    /// Upper bound of the score domain (the lower bound is always 0).
    pub fn max_score(self) -> u32 {
        match self {
            Skill::Reading | Skill::Grammar => 10,
            Skill::Writing | Skill::Listening => 4,
        }
    }

    /// Value substituted when the raw input is not a number.
    pub fn fallback_score(self) -> u32 {
        match self {
            Skill::Writing => 1,
            Skill::Reading | Skill::Grammar | Skill::Listening => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Skill::Reading => "reading comprehension",
            Skill::Grammar => "grammar",
            Skill::Writing => "written expression",
            Skill::Listening => "listening and speaking",
        }
    }

    /// Remediation statement shown when this skill is among the weakest.
    pub fn remediation(self) -> &'static str {
        match self {
            Skill::Reading => "Reading: connectors, implicit meaning, paraphrase.",
            Skill::Grammar => "Grammar/lexis: subjunctive, agreement, pronouns, formal register.",
            Skill::Writing => {
                "Writing: structure + connectors + lexical precision (180-220 words)."
            }
            Skill::Listening => "Speaking: outline, transitions, examples, paraphrase.",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priorities used before any assessment has been run.
pub fn fallback_priorities() -> Vec<String> {
    vec![
        Skill::Reading.remediation().to_string(),
        Skill::Grammar.remediation().to_string(),
    ]
}

/// Every remediation statement, in skill order. Shown on the status view
/// when no assessment exists.
pub fn all_remediations() -> Vec<String> {
    Skill::ALL
        .iter()
        .map(|s| s.remediation().to_string())
        .collect()
}

// ===================================================================
// Tiers
// ===================================================================

/// Proficiency tiers, lowest to highest. The derived `Ord` follows
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "A2")]
    A2,
    #[serde(rename = "B1")]
    B1,
    #[serde(rename = "B1+")]
    B1Plus,
    #[serde(rename = "B2")]
    B2,
    #[serde(rename = "B2+")]
    B2Plus,
    #[serde(rename = "C1")]
    C1,
}

/// Lower bound (inclusive, in percent) of each tier above A2.
const TIER_THRESHOLDS: [(u32, Tier); 5] = [
    (85, Tier::C1),
    (74, Tier::B2Plus),
    (62, Tier::B2),
    (50, Tier::B1Plus),
    (35, Tier::B1),
];

impl Tier {
    pub fn from_percent(pct: u32) -> Tier {
        TIER_THRESHOLDS
            .iter()
            .find(|(min, _)| pct >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::A2)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::A2 => "A2",
            Tier::B1 => "B1",
            Tier::B1Plus => "B1+",
            Tier::B2 => "B2",
            Tier::B2Plus => "B2+",
            Tier::C1 => "C1",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===================================================================
// Input: coerced scores
// ===================================================================

/// Four scores, each already clamped to its skill's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    pub reading: u32,
    pub grammar: u32,
    pub writing: u32,
    pub listening: u32,
}

impl Default for AssessmentInput {
    fn default() -> Self {
        Self {
            reading: Skill::Reading.fallback_score(),
            grammar: Skill::Grammar.fallback_score(),
            writing: Skill::Writing.fallback_score(),
            listening: Skill::Listening.fallback_score(),
        }
    }
}

impl AssessmentInput {
    /// Build from numeric values, clamping each into its domain.
    pub fn new(reading: i64, grammar: i64, writing: i64, listening: i64) -> Self {
        Self {
            reading: clamp(Skill::Reading, reading),
            grammar: clamp(Skill::Grammar, grammar),
            writing: clamp(Skill::Writing, writing),
            listening: clamp(Skill::Listening, listening),
        }
    }

    /// Build from untrusted text. Non-numeric fields take the skill's
    /// fallback score; numeric ones are rounded and clamped.
    pub fn from_raw(reading: &str, grammar: &str, writing: &str, listening: &str) -> Self {
        let or_fallback =
            |raw: &str, skill: Skill| parse_score(raw).unwrap_or(i64::from(skill.fallback_score()));
        Self::new(
            or_fallback(reading, Skill::Reading),
            or_fallback(grammar, Skill::Grammar),
            or_fallback(writing, Skill::Writing),
            or_fallback(listening, Skill::Listening),
        )
    }

    pub fn score(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Reading => self.reading,
            Skill::Grammar => self.grammar,
            Skill::Writing => self.writing,
            Skill::Listening => self.listening,
        }
    }

    /// Score as a fraction of the skill's maximum.
    pub fn ratio(&self, skill: Skill) -> f64 {
        f64::from(self.score(skill)) / f64::from(skill.max_score())
    }
}

fn clamp(skill: Skill, value: i64) -> u32 {
    value.clamp(0, i64::from(skill.max_score())) as u32
}

/// A finite number rounded to the nearest integer, or `None`.
fn parse_score(raw: &str) -> Option<i64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v.round() as i64),
        _ => None,
    }
}

// ===================================================================
// Output
// ===================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub level: Tier,
    pub total_score: u32,
    pub max_score: u32,
    pub percent: u32,
    pub strengths: Vec<String>,
    pub priorities: Vec<String>,
}

/// Normalized score at or above which a skill counts as a strength.
const STRENGTH_THRESHOLD: f64 = 0.7;

/// Number of weakest skills turned into priorities.
const PRIORITY_COUNT: usize = 2;

const ENCOURAGEMENT: &str =
    "A foundation is in place: the plan will build it up step by step toward B2+/C1.";

/// Score an assessment. Never fails: the input is already coerced.
pub fn evaluate(input: &AssessmentInput) -> AssessmentResult {
    let total_score: u32 = Skill::ALL.iter().map(|&s| input.score(s)).sum();
    let max_score: u32 = Skill::ALL.iter().map(|&s| s.max_score()).sum();
    let percent = rounded_percent(total_score, max_score);

    // Weakest first; the stable sort keeps the fixed skill order on ties.
    let mut ranked = Skill::ALL.to_vec();
    ranked.sort_by(|a, b| input.ratio(*a).total_cmp(&input.ratio(*b)));

    let priorities = ranked
        .iter()
        .take(PRIORITY_COUNT)
        .map(|s| s.remediation().to_string())
        .collect();

    let mut strengths: Vec<String> = ranked
        .iter()
        .rev()
        .filter(|&&s| input.ratio(s) >= STRENGTH_THRESHOLD)
        .map(|s| format!("Comfortable with {s} ({}/{}).", input.score(*s), s.max_score()))
        .collect();
    if strengths.is_empty() {
        strengths.push(ENCOURAGEMENT.to_string());
    }

    AssessmentResult {
        level: Tier::from_percent(percent),
        total_score,
        max_score,
        percent,
        strengths,
        priorities,
    }
}

/// `points / total` as a whole percentage, rounding halves up.
fn rounded_percent(points: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (points * 100 + total / 2) / total
}
