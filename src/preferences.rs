use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

const FILENAME: &str = "studycoach.toml";

/// Output template: either an inline minijinja string or a path to a
/// template file (relative to the data directory).
///
/// In TOML this looks like one of:
///
/// ```toml
/// [today_template]
/// inline = "{{ session.focus }}: {{ session.durationMinutes | minutes }}"
///
/// # or
///
/// [today_template]
/// file = "today.tmpl"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutputTemplate {
    /// Use the built-in template.
    #[default]
    Builtin,
    /// An inline minijinja template string.
    Inline(String),
    /// Path to a template file (relative to the data directory).
    File(String),
}

impl OutputTemplate {
    /// Resolve to template source, or `None` for the built-in one.
    pub fn resolve(&self, dir: &Path) -> Result<Option<String>> {
        match self {
            OutputTemplate::Builtin => Ok(None),
            OutputTemplate::Inline(s) => Ok(Some(s.clone())),
            OutputTemplate::File(filename) => {
                let path = dir.join(filename);
                fs::read_to_string(&path)
                    .map(Some)
                    .with_context(|| format!("reading template {}", path.display()))
            }
        }
    }
}

/// User-facing preferences stored in `<data-dir>/studycoach.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Preferences {
    /// Default log filter when neither `STUDYCOACH_LOG` nor `--verbose`
    /// is given. Any `tracing_subscriber::EnvFilter` directive works.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Template for `studycoach today`.
    #[serde(default)]
    pub today_template: OutputTemplate,

    /// Template for `studycoach plan`.
    #[serde(default)]
    pub plan_template: OutputTemplate,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            today_template: OutputTemplate::default(),
            plan_template: OutputTemplate::default(),
        }
    }
}

impl Preferences {
    /// Load preferences from `<dir>/studycoach.toml`.
    ///
    /// If the file doesn't exist it is created with defaults. Missing keys
    /// in an existing file are filled in with defaults via serde.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(FILENAME);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let prefs: Preferences = toml::from_str(&contents)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Ok(prefs)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let prefs = Preferences::default();
                let toml_str = toml::to_string_pretty(&prefs)
                    .context("serializing default preferences")?;
                fs::write(&path, &toml_str)
                    .with_context(|| format!("writing default {}", path.display()))?;
                Ok(prefs)
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}
