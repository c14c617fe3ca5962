use thiserror::Error;

use crate::schedule::types::Guess;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("No people in the availability matrix")]
    NoPeople,

    #[error("No dates in the availability matrix")]
    NoDates,

    #[error("Availability row of person {person} has {found} dates, expected {expected}")]
    RaggedRow {
        person: usize,
        expected: usize,
        found: usize,
    },

    #[error("Got {skills} skill levels for {people} people")]
    SkillCountMismatch { people: usize, skills: usize },

    #[error("Got {labels} date labels for {columns} availability columns")]
    DateCountMismatch { labels: usize, columns: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Fallback guess {0:?} is not a candidate of its own grid")]
    InconsistentFrame(Guess),

    #[error("Branching frame has no undecided cell")]
    NothingToBranch,

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
