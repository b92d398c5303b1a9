use super::*;
use crate::assessment::{AssessmentInput, evaluate};
use crate::types::Links;
use chrono::TimeZone;

// ===================================================================
// Test helpers
// ===================================================================

fn day(s: &str) -> DayKey {
    s.parse().unwrap()
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
}

fn settings(daily: u32, weekend: u32) -> Settings {
    Settings {
        daily_minutes: daily,
        weekend_minutes: weekend,
        ..Settings::default()
    }
}

fn priorities(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ===================================================================
// Focus rotation
// ===================================================================

#[test]
fn focus_cycle_wraps() {
    assert_eq!(Focus::at(0), Focus::Grammar);
    assert_eq!(Focus::at(5), Focus::Listening);
    assert_eq!(Focus::at(6), Focus::Grammar);
    assert_eq!(Focus::at(-1), Focus::Listening);
}

#[test]
fn every_focus_has_two_non_empty_tasks() {
    for focus in Focus::CYCLE {
        for task in focus.tasks() {
            assert!(!task.is_empty(), "{focus:?} has an empty task");
        }
    }
}

// ===================================================================
// Task assembly
// ===================================================================

#[test]
fn task_order_for_short_session() {
    let tasks = build_tasks(
        Focus::Writing,
        30,
        &priorities(&["first", "second", "third"]),
        Some("https://example.org"),
    );
    assert_eq!(tasks.len(), 2 + 3 + 2 + 1);
    assert_eq!(tasks[0], "Priority: first");
    assert_eq!(tasks[1], "Priority: second");
    assert_eq!(&tasks[2..5], BASELINE_TASKS.map(String::from).as_slice());
    assert_eq!(tasks[5], Focus::Writing.tasks()[0]);
    assert_eq!(tasks[6], Focus::Writing.tasks()[1]);
    assert_eq!(tasks[7], "Resource: https://example.org");
}

#[test]
fn bonus_thresholds_are_independent_and_additive() {
    let p = priorities(&["p"]);
    let at = |minutes| build_tasks(Focus::Grammar, minutes, &p, None);

    let t44 = at(44);
    assert!(!t44.iter().any(|t| t == SHORT_BONUS_TASK));

    let t45 = at(45);
    assert!(t45.iter().any(|t| t == SHORT_BONUS_TASK));
    assert!(!t45.iter().any(|t| t == LONG_BONUS_TASK));

    let t120 = at(120);
    let short = t120.iter().position(|t| t == SHORT_BONUS_TASK).unwrap();
    let long = t120.iter().position(|t| t == LONG_BONUS_TASK).unwrap();
    assert!(short < long);
    assert_eq!(long + 2, t120.len(), "resource line stays last");
}

#[test]
fn missing_resource_gets_placeholder() {
    let tasks = build_tasks(Focus::Reading, 30, &[], None);
    let last = tasks.last().unwrap();
    assert!(last.starts_with("Resource: (add your links"), "got {last}");
    // No priorities: starts straight at the baseline.
    assert_eq!(tasks[0], BASELINE_TASKS[0]);
}

// ===================================================================
// Plan generation
// ===================================================================

#[test]
fn plan_covers_thirty_consecutive_days() {
    let plan = generate(None, &Settings::default(), day("2026-10-19"), fixed_now());
    assert_eq!(plan.sessions.len(), PLAN_DAYS as usize);
    assert_eq!(plan.sessions[0].date, day("2026-10-19"));
    assert_eq!(plan.sessions[29].date, day("2026-11-17"));
    for (i, s) in plan.sessions.iter().enumerate() {
        assert_eq!(s.index as usize, i);
        assert_eq!(s.focus, Focus::at(i as i64));
    }
    assert_eq!(plan.generated_at, Some(fixed_now()));
    assert_eq!(plan.structure.len(), 3);
}

#[test]
fn saturday_gets_weekend_duration_regardless_of_cycle_position() {
    // Start on Thursday 2026-10-15; index 2 is Saturday the 17th.
    let plan = generate(None, &settings(30, 90), day("2026-10-15"), fixed_now());
    let sat = &plan.sessions[2];
    assert_eq!(sat.date, day("2026-10-17"));
    assert_eq!(sat.duration_minutes, 90);
    assert_eq!(plan.sessions[3].duration_minutes, 90);
    assert_eq!(plan.sessions[4].duration_minutes, 30);
    for s in &plan.sessions {
        let expected = if s.date.is_weekend() { 90 } else { 30 };
        assert_eq!(s.duration_minutes, expected, "on {}", s.date);
    }
}

#[test]
fn plan_uses_assessment_priorities() {
    let result = evaluate(&AssessmentInput::new(8, 6, 3, 1));
    let plan = generate(Some(&result), &Settings::default(), day("2026-10-19"), fixed_now());
    let first = &plan.sessions[0].tasks;
    assert_eq!(first[0], format!("Priority: {}", result.priorities[0]));
    assert_eq!(first[1], format!("Priority: {}", result.priorities[1]));
}

#[test]
fn plan_without_assessment_uses_fallback_priorities() {
    let plan = generate(None, &Settings::default(), day("2026-10-19"), fixed_now());
    let fallback = assessment::fallback_priorities();
    assert_eq!(plan.sessions[0].tasks[0], format!("Priority: {}", fallback[0]));
}

#[test]
fn plan_resource_line_uses_first_configured_link() {
    let cfg = Settings {
        links: Links {
            link1: "  ".into(),
            link2: "https://b.example".into(),
            link3: "https://c.example".into(),
        },
        ..Settings::default()
    };
    let plan = generate(None, &cfg, day("2026-10-19"), fixed_now());
    for s in &plan.sessions {
        assert_eq!(s.tasks.last().unwrap(), "Resource: https://b.example");
    }
}

#[test]
fn generation_is_deterministic() {
    let result = evaluate(&AssessmentInput::new(2, 9, 4, 0));
    let cfg = settings(50, 150);
    let a = generate(Some(&result), &cfg, day("2026-12-30"), fixed_now());
    let b = generate(Some(&result), &cfg, day("2026-12-30"), fixed_now());
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn structure_lines_embed_formatted_durations() {
    let lines = structure(&settings(90, 120));
    assert!(lines[0].contains("(1 h 30 min)"));
    assert!(lines[1].contains("(2 h)"));
}

// ===================================================================
// Daily session
// ===================================================================

#[test]
fn daily_session_follows_epoch_rotation() {
    let today = day("2026-10-19");
    let s = daily_session(None, &Settings::default(), today);
    assert_eq!(s.date_key, today);
    assert_eq!(s.focus, Focus::at(today.epoch_index()));
    assert_eq!(s.duration_minutes, 30);
    assert!(!s.done);

    let sunday = daily_session(None, &Settings::default(), day("2026-10-18"));
    assert_eq!(sunday.duration_minutes, 120);
}

#[test]
fn refresh_keeps_same_day_and_replaces_other_days() {
    let today = day("2026-10-19");
    let mut cached = daily_session(None, &Settings::default(), today);
    cached.done = true;

    let kept = refresh_daily(Some(cached.clone()), None, &Settings::default(), today);
    assert_eq!(kept, cached);

    let next = refresh_daily(Some(cached), None, &Settings::default(), today.add_days(1));
    assert_eq!(next.date_key, today.add_days(1));
    assert!(!next.done);
}

// ===================================================================
// Formatting
// ===================================================================

#[test]
fn format_minutes_cases() {
    assert_eq!(format_minutes(30), "30 min");
    assert_eq!(format_minutes(59), "59 min");
    assert_eq!(format_minutes(60), "1 h");
    assert_eq!(format_minutes(75), "1 h 15 min");
    assert_eq!(format_minutes(120), "2 h");
}
