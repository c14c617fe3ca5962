use serde::{Deserialize, Serialize};

/// State of one (person, slot) cell during the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Unknown,
    Assigned,
    Excluded,
}

/// Trial forcing of one undecided cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    pub person: usize,
    pub slot: usize,
    pub value: bool,
}

impl Guess {
    /// The cell state this guess writes
    pub fn cell(&self) -> Cell {
        if self.value {
            Cell::Assigned
        } else {
            Cell::Excluded
        }
    }
}

/// Final label of a cell in a solved schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    TeamOne,
    TeamTwo,
    Substitute,
    Unplanned,
}

impl CellState {
    /// On one of the two teams
    pub fn is_playing(self) -> bool {
        matches!(self, CellState::TeamOne | CellState::TeamTwo)
    }
}

/// Raw input of one solver run: people are rows, dates are columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub availability: Vec<Vec<bool>>,
    pub skills: Vec<u32>,
    pub dates: Vec<String>,
}

/// A complete, valid schedule with its soft-constraint score (lower is better)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub score: f64,
    pub schedule: Vec<Vec<CellState>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Search space exhausted after at least one solution was reported
    Success,
    /// Search space exhausted without any solution
    NoSolution,
    /// Stopped by the caller
    Cancelled,
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: SolveStatus,
    pub best: Option<Solution>,
    pub iterations: u64,
    /// Complete valid grids seen, improving or not
    pub solutions_found: u64,
}

/// Progress reported by the engine while it runs
#[derive(Debug, Clone, PartialEq)]
pub enum SolverEvent {
    /// A solution strictly better than every earlier one
    Improved(Solution),
    /// Sent exactly once, last
    Finished(Outcome),
}
