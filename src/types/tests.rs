use super::*;
use crate::assessment::{Tier, evaluate};
use crate::planner;
use chrono::TimeZone;
use serde_json::json;

fn day(s: &str) -> DayKey {
    s.parse().unwrap()
}

/// A document with every section populated.
fn full_document() -> Document {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap();
    let scores = AssessmentInput::new(8, 6, 3, 1);
    let result = evaluate(&scores);
    let settings = Settings {
        daily_minutes: 45,
        weekend_minutes: 90,
        target_date: Some(day("2027-04-19")),
        links: Links {
            link1: "https://a.example".into(),
            link2: String::new(),
            link3: "https://c.example".into(),
        },
    };
    let plan = planner::generate(Some(&result), &settings, day("2026-10-19"), now);
    let mut today = planner::daily_session(Some(&result), &settings, day("2026-10-19"));
    today.done = true;
    Document {
        profile: Profile {
            themes: "economics, climate".into(),
            hard: HardArea::Grammar,
        },
        diagnostic: Diagnostic {
            scores,
            result: Some(result),
            last_run_at: Some(now),
        },
        plan,
        today: Some(today),
        streak: StreakState {
            count: 3,
            last_done_date_key: Some(day("2026-10-19")),
        },
        settings,
    }
}

// =================================================================
// Defaults
// =================================================================

#[test]
fn empty_object_loads_defaults() {
    let doc: Document = serde_json::from_str("{}").unwrap();
    assert_eq!(doc, Document::default());
    assert_eq!(doc.settings.daily_minutes, 30);
    assert_eq!(doc.settings.weekend_minutes, 120);
    assert_eq!(doc.profile.hard, HardArea::Both);
    assert_eq!(doc.streak.count, 0);
    assert!(doc.streak.last_done_date_key.is_none());
    assert!(doc.today.is_none());
    assert_eq!(doc.diagnostic.scores.writing, 1);
}

#[test]
fn partial_sections_merge_over_defaults() {
    let doc: Document = serde_json::from_value(json!({
        "settings": { "dailyMinutes": 20, "links": { "link2": "https://x.example" } },
        "streak": { "count": 5 },
        "diagnostic": { "scores": { "reading": 9 } }
    }))
    .unwrap();
    assert_eq!(doc.settings.daily_minutes, 20);
    assert_eq!(doc.settings.weekend_minutes, 120);
    assert_eq!(doc.settings.links.first(), Some("https://x.example"));
    assert_eq!(doc.streak.count, 5);
    assert!(doc.streak.last_done_date_key.is_none());
    assert_eq!(doc.diagnostic.scores.reading, 9);
    assert_eq!(doc.diagnostic.scores.writing, 1);
}

#[test]
fn unknown_fields_are_ignored() {
    let doc: Document = serde_json::from_value(json!({
        "version": 7,
        "settings": { "theme": "dark" }
    }))
    .unwrap();
    assert_eq!(doc, Document::default());
}

// =================================================================
// Wire shape
// =================================================================

#[test]
fn serializes_camel_case_keys_and_day_keys() {
    let doc = full_document();
    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["settings"]["dailyMinutes"], json!(45));
    assert_eq!(v["settings"]["targetDate"], json!("2027-04-19"));
    assert_eq!(v["streak"]["lastDoneDateKey"], json!("2026-10-19"));
    assert_eq!(v["diagnostic"]["result"]["level"], json!("B2"));
    assert_eq!(v["plan"]["sessions"][0]["focus"], json!("grammar"));
    assert_eq!(v["today"]["dateKey"], json!("2026-10-19"));
    assert_eq!(v["profile"]["hard"], json!("grammar"));
}

#[test]
fn today_is_omitted_when_absent() {
    let v = serde_json::to_value(Document::default()).unwrap();
    assert!(v.get("today").is_none());
}

#[test]
fn full_document_round_trips() {
    let doc = full_document();
    let text = serde_json::to_string_pretty(&doc).unwrap();
    let back: Document = serde_json::from_str(&text).unwrap();
    assert_eq!(back, doc);
    assert_eq!(back.diagnostic.result.unwrap().level, Tier::B2);
}

#[test]
fn trimmed_sessions_fill_missing_fields() {
    let doc: Document = serde_json::from_value(json!({
        "plan": { "sessions": [{ "index": 0, "date": "2026-10-19" }] },
        "today": { "dateKey": "2026-10-19" }
    }))
    .unwrap();
    let session = &doc.plan.sessions[0];
    assert_eq!(session.focus, planner::Focus::Grammar);
    assert_eq!(session.duration_minutes, 0);
    assert!(session.tasks.is_empty());

    let today = doc.today.unwrap();
    assert_eq!(today.date_key, day("2026-10-19"));
    assert!(today.tasks.is_empty());
    assert!(!today.done);
}

#[test]
fn bad_date_key_is_rejected() {
    let err = serde_json::from_value::<Document>(json!({
        "streak": { "lastDoneDateKey": "yesterday" }
    }));
    assert!(err.is_err());
}

// =================================================================
// Links
// =================================================================

#[test]
fn first_link_skips_blank_slots() {
    let links = Links {
        link1: String::new(),
        link2: " ".into(),
        link3: " https://z.example ".into(),
    };
    assert_eq!(links.first(), Some("https://z.example"));
    assert_eq!(Links::default().first(), None);
}

#[test]
fn hard_area_parses_case_insensitively() {
    assert_eq!("Grammar".parse::<HardArea>(), Ok(HardArea::Grammar));
    assert_eq!(" both ".parse::<HardArea>(), Ok(HardArea::Both));
    assert!("listening".parse::<HardArea>().is_err());
}
