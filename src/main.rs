mod assessment;
mod calendar;
mod lesson;
mod logging;
mod planner;
mod preferences;
mod render;
mod streak;
mod types;
mod workspace;

use anyhow::Result;
use calendar::DayKey;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use types::HardArea;
use workspace::{AssessRequest, Report, SettingsUpdate, Workspace};

#[derive(Parser)]
#[command(
    name = "studycoach",
    about = "Self-assessment, study plan and daily check-in tracker"
)]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding state.json and studycoach.toml
    #[arg(long, global = true, env = "STUDYCOACH_HOME")]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<DayKey>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a self-assessment and store the result
    Assess(AssessArgs),
    /// Show the stored assessment result
    Results,
    /// Regenerate the 30-day plan starting today
    Plan {
        /// Show the stored plan without regenerating it
        #[arg(long)]
        show: bool,
    },
    /// Show today's session and grammar lesson
    Today,
    /// Mark today's session done and update the streak
    Done,
    /// Level, streak and current priorities
    Status,
    /// Grammar lesson of the day
    Lesson {
        /// Reveal the exercise answer
        #[arg(long)]
        answer: bool,
    },
    /// Show or change plan settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Write the whole document as JSON (stdout when the path is omitted or `-`)
    Export { path: Option<PathBuf> },
    /// Replace the document with an exported JSON file
    Import { path: PathBuf },
}

#[derive(Args)]
struct AssessArgs {
    /// Reading comprehension score, 0-10
    #[arg(long, allow_hyphen_values = true)]
    reading: Option<String>,
    /// Grammar score, 0-10
    #[arg(long, allow_hyphen_values = true)]
    grammar: Option<String>,
    /// Writing self-rating, 0-4
    #[arg(long, allow_hyphen_values = true)]
    writing: Option<String>,
    /// Listening/speaking self-rating, 0-4
    #[arg(long, allow_hyphen_values = true)]
    listening: Option<String>,
    /// Topics you like to study with
    #[arg(long)]
    themes: Option<String>,
    /// Hardest area: reading, grammar or both
    #[arg(long)]
    hard: Option<HardArea>,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,
    /// Change one or more settings
    Set(SetArgs),
}

#[derive(Args)]
struct SetArgs {
    /// Weekday session length in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    daily: Option<u32>,
    /// Weekend session length in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    weekend: Option<u32>,
    /// Target exam date (YYYY-MM-DD)
    #[arg(long)]
    target: Option<DayKey>,
    #[arg(long)]
    link1: Option<String>,
    #[arg(long)]
    link2: Option<String>,
    #[arg(long)]
    link3: Option<String>,
}

fn run(cli: Cli) -> Result<Report> {
    let dir = workspace::resolve_dir(cli.data_dir)?;
    let ws = Workspace::open(&dir)?;
    logging::init_logging(cli.verbose, &ws.prefs.log_level);

    let today = cli.today.unwrap_or_else(DayKey::today_local);
    let now = chrono::Utc::now();
    tracing::debug!(dir = %dir.display(), today = %today, "starting");

    match cli.command {
        Commands::Assess(a) => {
            let req = AssessRequest {
                reading: a.reading.unwrap_or_default(),
                grammar: a.grammar.unwrap_or_default(),
                writing: a.writing.unwrap_or_default(),
                listening: a.listening.unwrap_or_default(),
                themes: a.themes,
                hard: a.hard,
            };
            ws.handle_assess(&req, now)
        }
        Commands::Results => ws.handle_results(),
        Commands::Plan { show } => ws.handle_plan(show, today, now),
        Commands::Today => ws.handle_today(today),
        Commands::Done => ws.handle_done(today),
        Commands::Status => ws.handle_status(),
        Commands::Lesson { answer } => ws.handle_lesson(today, answer),
        Commands::Settings { action } => match action {
            SettingsAction::Show => ws.handle_settings_show(today),
            SettingsAction::Set(s) => ws.handle_settings_set(&SettingsUpdate {
                daily_minutes: s.daily,
                weekend_minutes: s.weekend,
                target_date: s.target,
                link1: s.link1,
                link2: s.link2,
                link3: s.link3,
            }),
        },
        Commands::Export { path } => ws.handle_export(path.as_deref()),
        Commands::Import { path } => ws.handle_import(&path),
    }
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(report) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report.json).expect("Failed to serialize output")
                );
            } else if !report.text.is_empty() {
                println!("{}", report.text);
            }
        }
        Err(err) => {
            eprintln!("studycoach: {err:#}");
            process::exit(2);
        }
    }
}
