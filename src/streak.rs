use crate::calendar::DayKey;
use crate::types::StreakState;

/// What a completion event did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Today was already recorded; nothing changed.
    AlreadyDone,
    /// Completed the day after the last completion.
    Extended,
    /// First completion ever, or after a gap: the count restarts at 1.
    Started,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::AlreadyDone => "already-done",
            Transition::Extended => "extended",
            Transition::Started => "started",
        }
    }
}

/// Record a completion on `today`.
pub fn mark_done(state: &mut StreakState, today: DayKey) -> Transition {
    let transition = match state.last_done_date_key {
        Some(last) if last == today => return Transition::AlreadyDone,
        Some(last) if today.is_day_after(last) => {
            state.count = state.count.saturating_add(1);
            Transition::Extended
        }
        _ => {
            state.count = 1;
            Transition::Started
        }
    };
    state.last_done_date_key = Some(today);
    transition
}
