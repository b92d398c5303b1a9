use crate::assessment::{self, AssessmentInput};
use crate::calendar::DayKey;
use crate::lesson;
use crate::planner;
use crate::preferences::Preferences;
use crate::render;
use crate::streak::{self, Transition};
use crate::types::{Diagnostic, Document, HardArea};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.json";
const APP_DIR: &str = "studycoach";
const STDOUT_PATH: &str = "-";

/// Read and deserialize a JSON file, returning `None` if it doesn't exist.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(s) => {
            let val = serde_json::from_str(&s)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(Some(val))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Pick the data directory: an explicit path wins, otherwise the
/// platform data dir (e.g. `~/.local/share/studycoach`).
pub fn resolve_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .context("no platform data directory; pass --data-dir"),
    }
}

/// What a command produced: rendered text for people, a JSON value for
/// `--json` consumers.
pub struct Report {
    pub text: String,
    pub json: serde_json::Value,
}

// ===================================================================
// Command inputs that carry more than a flag or two
// ===================================================================

/// Raw, unvalidated assessment arguments.
#[derive(Debug, Default)]
pub struct AssessRequest {
    pub reading: String,
    pub grammar: String,
    pub writing: String,
    pub listening: String,
    pub themes: Option<String>,
    pub hard: Option<HardArea>,
}

/// Fields to change with `settings set`; `None` leaves a field alone.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub daily_minutes: Option<u32>,
    pub weekend_minutes: Option<u32>,
    pub target_date: Option<DayKey>,
    pub link1: Option<String>,
    pub link2: Option<String>,
    pub link3: Option<String>,
}

/// Months ahead used for the target date when none is configured.
const DEFAULT_TARGET_MONTHS: u32 = 6;

/// The data directory plus loaded preferences. Each command loads the
/// document once, mutates it in memory, and saves it once.
///
/// There is no locking: one process is expected to own a data directory
/// at a time.
pub struct Workspace {
    dir: PathBuf,
    pub prefs: Preferences,
}

impl Workspace {
    /// Ensure `dir` exists, load preferences, and return a `Workspace`.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let prefs = Preferences::load(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            prefs,
        })
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    // ---------------------------------------------------------------
    // Document I/O
    // ---------------------------------------------------------------

    /// Load the document, or the default one if nothing has been saved.
    pub fn load(&self) -> Result<Document> {
        let path = self.state_path();
        let doc = read_json_file(&path)?;
        tracing::debug!(path = %path.display(), found = doc.is_some(), "loaded document");
        Ok(doc.unwrap_or_default())
    }

    pub fn save(&self, doc: &Document) -> Result<()> {
        let path = self.state_path();
        let json = serde_json::to_string_pretty(doc).context("serializing document")?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "saved document");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Command handlers
    // ---------------------------------------------------------------

    pub fn handle_assess(&self, req: &AssessRequest, now: DateTime<Utc>) -> Result<Report> {
        let mut doc = self.load()?;

        let scores =
            AssessmentInput::from_raw(&req.reading, &req.grammar, &req.writing, &req.listening);
        let result = assessment::evaluate(&scores);
        tracing::info!(
            level = %result.level,
            total = result.total_score,
            max = result.max_score,
            "assessment scored"
        );

        doc.diagnostic = Diagnostic {
            scores,
            result: Some(result),
            last_run_at: Some(now),
        };
        if let Some(themes) = &req.themes {
            doc.profile.themes = themes.trim().to_string();
        }
        if let Some(hard) = req.hard {
            doc.profile.hard = hard;
        }
        drop_pending_today(&mut doc);
        self.save(&doc)?;

        Ok(Report {
            text: render::results(&doc.diagnostic)?,
            json: serde_json::to_value(&doc.diagnostic).context("serializing diagnostic")?,
        })
    }

    pub fn handle_results(&self) -> Result<Report> {
        let doc = self.load()?;
        Ok(Report {
            text: render::results(&doc.diagnostic)?,
            json: serde_json::to_value(&doc.diagnostic).context("serializing diagnostic")?,
        })
    }

    /// Regenerate the plan from `today` (replacing any previous one), or
    /// just show the stored plan when `show_only` is set.
    pub fn handle_plan(&self, show_only: bool, today: DayKey, now: DateTime<Utc>) -> Result<Report> {
        let mut doc = self.load()?;
        if !show_only {
            doc.plan = planner::generate(doc.diagnostic.result.as_ref(), &doc.settings, today, now);
            tracing::info!(start = %today, sessions = doc.plan.sessions.len(), "plan regenerated");
            self.save(&doc)?;
        }
        let template = self.prefs.plan_template.resolve(&self.dir)?;
        Ok(Report {
            text: render::plan(template.as_deref(), &doc.plan, &doc.settings)?,
            json: serde_json::to_value(&doc.plan).context("serializing plan")?,
        })
    }

    pub fn handle_today(&self, today: DayKey) -> Result<Report> {
        let mut doc = self.load()?;
        let cached = doc.today.take();
        let stale = cached.as_ref().map(|s| s.date_key) != Some(today);
        let session = planner::refresh_daily(
            cached,
            doc.diagnostic.result.as_ref(),
            &doc.settings,
            today,
        );
        doc.today = Some(session.clone());
        if stale {
            tracing::debug!(date = %today, focus = %session.focus, "computed daily session");
            self.save(&doc)?;
        }

        let lesson = lesson::lesson_for(today);
        let template = self.prefs.today_template.resolve(&self.dir)?;
        Ok(Report {
            text: render::today(template.as_deref(), &session, &doc.streak, lesson)?,
            json: json!({
                "session": session,
                "streak": doc.streak,
                "lesson": lesson,
            }),
        })
    }

    /// Mark today's session done and advance the streak. Repeating it on
    /// the same day changes nothing.
    pub fn handle_done(&self, today: DayKey) -> Result<Report> {
        let mut doc = self.load()?;
        let mut session = planner::refresh_daily(
            doc.today.take(),
            doc.diagnostic.result.as_ref(),
            &doc.settings,
            today,
        );
        session.done = true;
        doc.today = Some(session);

        let transition = streak::mark_done(&mut doc.streak, today);
        tracing::info!(
            date = %today,
            transition = transition.as_str(),
            count = doc.streak.count,
            "completion recorded"
        );
        self.save(&doc)?;

        let text = match transition {
            Transition::AlreadyDone => format!(
                "{today} was already marked done. Streak: {}",
                doc.streak.count
            ),
            Transition::Extended | Transition::Started => {
                format!("Marked {today} done. Streak: {}", doc.streak.count)
            }
        };
        Ok(Report {
            text,
            json: json!({
                "transition": transition.as_str(),
                "streak": doc.streak,
            }),
        })
    }

    pub fn handle_status(&self) -> Result<Report> {
        let doc = self.load()?;
        let level = doc.diagnostic.result.as_ref().map(|r| r.level);
        let priorities: Vec<String> = match &doc.diagnostic.result {
            Some(r) => r.priorities.clone(),
            None => assessment::all_remediations(),
        }
        .into_iter()
        .take(4)
        .collect();

        Ok(Report {
            text: render::status(
                level.map(|l| l.as_str()),
                &doc.streak,
                &doc.settings,
                &priorities,
            )?,
            json: json!({
                "level": level,
                "streak": doc.streak,
                "settings": doc.settings,
                "priorities": priorities,
            }),
        })
    }

    pub fn handle_lesson(&self, today: DayKey, show_answer: bool) -> Result<Report> {
        let lesson = lesson::lesson_for(today);
        let mut value = serde_json::to_value(lesson).context("serializing lesson")?;
        if !show_answer {
            if let Some(obj) = value.as_object_mut() {
                obj.remove("answer");
            }
        }
        Ok(Report {
            text: render::lesson(lesson, show_answer)?,
            json: value,
        })
    }

    /// Show settings, filling in a default target date on first view.
    pub fn handle_settings_show(&self, today: DayKey) -> Result<Report> {
        let mut doc = self.load()?;
        if doc.settings.target_date.is_none() {
            let target = today.add_months(DEFAULT_TARGET_MONTHS);
            tracing::debug!(target_date = %target, "defaulting target date");
            doc.settings.target_date = Some(target);
            self.save(&doc)?;
        }
        Ok(Report {
            text: render::settings(&doc.settings)?,
            json: serde_json::to_value(&doc.settings).context("serializing settings")?,
        })
    }

    pub fn handle_settings_set(&self, update: &SettingsUpdate) -> Result<Report> {
        ensure_durations(update.daily_minutes, update.weekend_minutes)?;

        let mut doc = self.load()?;
        let settings = &mut doc.settings;
        if let Some(m) = update.daily_minutes {
            settings.daily_minutes = m;
        }
        if let Some(m) = update.weekend_minutes {
            settings.weekend_minutes = m;
        }
        if let Some(d) = update.target_date {
            settings.target_date = Some(d);
        }
        for (slot, value) in [
            (&mut settings.links.link1, &update.link1),
            (&mut settings.links.link2, &update.link2),
            (&mut settings.links.link3, &update.link3),
        ] {
            if let Some(v) = value {
                *slot = v.trim().to_string();
            }
        }
        drop_pending_today(&mut doc);
        self.save(&doc)?;
        tracing::info!("settings updated");

        Ok(Report {
            text: render::settings(&doc.settings)?,
            json: serde_json::to_value(&doc.settings).context("serializing settings")?,
        })
    }

    /// Export the whole document as pretty JSON. With no destination, or
    /// `-`, the JSON becomes the report text (printed to stdout).
    pub fn handle_export(&self, dest: Option<&Path>) -> Result<Report> {
        let doc = self.load()?;
        let pretty = serde_json::to_string_pretty(&doc).context("serializing document")?;
        let json = serde_json::to_value(&doc).context("serializing document")?;
        match dest.filter(|p| *p != Path::new(STDOUT_PATH)) {
            Some(path) => {
                fs::write(path, &pretty)
                    .with_context(|| format!("writing export {}", path.display()))?;
                tracing::info!(path = %path.display(), "document exported");
                Ok(Report {
                    text: format!("Exported to {}", path.display()),
                    json,
                })
            }
            None => Ok(Report { text: pretty, json }),
        }
    }

    /// Replace the document with an exported one. Missing fields take
    /// their defaults; an unparseable file leaves the current document
    /// untouched.
    pub fn handle_import(&self, src: &Path) -> Result<Report> {
        let doc: Document = read_json_file(src)?
            .with_context(|| format!("import file {} not found", src.display()))?;
        ensure_durations(Some(doc.settings.daily_minutes), Some(doc.settings.weekend_minutes))
            .with_context(|| format!("importing {}", src.display()))?;
        self.save(&doc)?;
        tracing::info!(path = %src.display(), sessions = doc.plan.sessions.len(), "document imported");
        Ok(Report {
            text: format!("Imported {}", src.display()),
            json: serde_json::to_value(&doc).context("serializing document")?,
        })
    }
}

/// Session durations of zero would produce empty days; reject them before
/// they reach the planner.
fn ensure_durations(daily: Option<u32>, weekend: Option<u32>) -> Result<()> {
    if daily == Some(0) || weekend == Some(0) {
        bail!("session durations must be at least 1 minute");
    }
    Ok(())
}

/// Forget today's cached session if it has not been completed yet, so the
/// next `today` picks up new priorities or durations.
fn drop_pending_today(doc: &mut Document) {
    if doc.today.as_ref().is_some_and(|s| !s.done) {
        doc.today = None;
    }
}
