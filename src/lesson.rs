use crate::calendar::DayKey;
use serde::Serialize;

/// One entry in the rotating grammar program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub title: &'static str,
    pub rule: &'static str,
    pub example: &'static str,
    pub exercise: &'static str,
    pub answer: &'static str,
}

pub const PROGRAM: [Lesson; 4] = [
    Lesson {
        title: "Logical connectors",
        rule: "Connectors structure a text: cause, consequence, opposition, purpose.",
        example: "Although the economy is growing, unemployment remains high.",
        exercise: "Fill in: ___ it rains, I will come.",
        answer: "Even if",
    },
    Lesson {
        title: "The subjunctive",
        rule: "Use the subjunctive after expressions of doubt, necessity or emotion.",
        example: "It is essential that he be on time.",
        exercise: "Fill in: It is important that you ___ (to be) punctual.",
        answer: "be",
    },
    Lesson {
        title: "Past participle agreement",
        rule: "The past participle agrees with a direct object placed before it.",
        example: "The letters that I have written.",
        exercise: "Fill in: The mistakes that I have ___ (to correct).",
        answer: "corrected",
    },
    Lesson {
        title: "Relative pronouns",
        rule: "Who, which, whose and where link two clauses.",
        example: "The book I am talking about is interesting.",
        exercise: "Fill in: The company ___ I work is hiring.",
        answer: "where",
    },
];

/// The lesson for a given day; rotates through the program once per day.
pub fn lesson_for(day: DayKey) -> &'static Lesson {
    let idx = day.epoch_index().rem_euclid(PROGRAM.len() as i64) as usize;
    &PROGRAM[idx]
}
