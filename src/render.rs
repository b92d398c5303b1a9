use crate::lesson::Lesson;
use crate::planner::format_minutes;
use crate::types::{DailySession, Diagnostic, Plan, Settings, StreakState};
use minijinja::{Environment, context};
use serde::Serialize;
use std::fmt;

// ===================================================================
// Built-in templates
// ===================================================================

const TODAY: &str = r#"{{ session.dateKey }} | streak: {{ streak.count }}
Session ({{ session.durationMinutes | minutes }}) | focus: {{ session.focus | capitalize }}{% if session.done %} | done{% endif %}

{% for task in session.tasks %}
- {{ task }}
{% endfor %}

Grammar lesson of the day: {{ lesson.title }}
Rule: {{ lesson.rule }}
Example: {{ lesson.example }}
Exercise: {{ lesson.exercise }}"#;

const PLAN: &str = r#"{% if not plan.sessions %}
No plan yet. Run `studycoach plan` to generate one.
{% else %}
Target date: {{ settings.targetDate or "-" }}
Weekdays: {{ settings.dailyMinutes | minutes }} | weekends: {{ settings.weekendMinutes | minutes }}

{% for line in plan.structure %}
* {{ line }}
{% endfor %}
{% for s in plan.sessions %}

Day {{ s.index + 1 }} | {{ s.focus | capitalize }}
{{ s.date }} | {{ s.durationMinutes | minutes }}
{% for task in s.tasks %}
- {{ task }}
{% endfor %}
{% endfor %}
{% endif %}"#;

const STATUS: &str = r#"Level: {{ level or "-" }}
Streak: {{ streak.count }}
Daily time: {{ settings.dailyMinutes | minutes }}
Goal: C1 | target date: {{ settings.targetDate or "not set (see `studycoach settings show`)" }}

Priorities:
{% for p in priorities %}
- {{ p }}
{% endfor %}"#;

const RESULTS: &str = r#"{% if not diagnostic.lastRunAt %}
Run the assessment first: `studycoach assess`.
{% else %}
Estimated level: {{ diagnostic.result.level }}
Score: {{ diagnostic.result.totalScore }}/{{ diagnostic.result.maxScore }} ({{ diagnostic.result.percent }}%)
Reading: {{ diagnostic.scores.reading }}/10 | Grammar: {{ diagnostic.scores.grammar }}/10 | Writing (self): {{ diagnostic.scores.writing }}/4 | Listening (self): {{ diagnostic.scores.listening }}/4

Strengths:
{% for s in diagnostic.result.strengths %}
- {{ s }}
{% endfor %}

Priorities:
{% for p in diagnostic.result.priorities %}
- {{ p }}
{% endfor %}
{% endif %}"#;

const LESSON: &str = r#"{{ lesson.title }}
Rule: {{ lesson.rule }}
Example: {{ lesson.example }}
Exercise: {{ lesson.exercise }}
{% if show_answer %}
Answer: {{ lesson.answer }}
{% endif %}"#;

const SETTINGS: &str = r#"Target date: {{ settings.targetDate or "-" }}
Daily time: {{ settings.dailyMinutes | minutes }}
Weekend time: {{ settings.weekendMinutes | minutes }}
Link 1: {{ settings.links.link1 or "-" }}
Link 2: {{ settings.links.link2 or "-" }}
Link 3: {{ settings.links.link3 or "-" }}"#;

// ===================================================================
// Error: only template parsing/rendering can fail
// ===================================================================

#[derive(Debug)]
pub enum RenderError {
    Parse(String),
    Render(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Parse(msg) => write!(f, "template parse error: {msg}"),
            RenderError::Render(msg) => write!(f, "template render error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

// ===================================================================
// Rendering
// ===================================================================

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("minutes", format_minutes);
    env
}

fn render<S: Serialize>(source: &str, ctx: S) -> Result<String, RenderError> {
    let env = environment();
    let tmpl = env
        .template_from_str(source)
        .map_err(|e| RenderError::Parse(e.to_string()))?;
    tmpl.render(ctx)
        .map(|s| s.trim_end().to_string())
        .map_err(|e| RenderError::Render(e.to_string()))
}

/// Render today's session. `template` overrides the built-in layout.
pub fn today(
    template: Option<&str>,
    session: &DailySession,
    streak: &StreakState,
    lesson: &Lesson,
) -> Result<String, RenderError> {
    render(
        template.unwrap_or(TODAY),
        context! { session, streak, lesson },
    )
}

/// Render the stored plan. `template` overrides the built-in layout.
pub fn plan(template: Option<&str>, plan: &Plan, settings: &Settings) -> Result<String, RenderError> {
    render(template.unwrap_or(PLAN), context! { plan, settings })
}

pub fn status(
    level: Option<&str>,
    streak: &StreakState,
    settings: &Settings,
    priorities: &[String],
) -> Result<String, RenderError> {
    render(STATUS, context! { level, streak, settings, priorities })
}

pub fn results(diagnostic: &Diagnostic) -> Result<String, RenderError> {
    render(RESULTS, context! { diagnostic })
}

pub fn lesson(lesson: &Lesson, show_answer: bool) -> Result<String, RenderError> {
    render(LESSON, context! { lesson, show_answer })
}

pub fn settings(settings: &Settings) -> Result<String, RenderError> {
    render(SETTINGS, context! { settings })
}
