//! Match scheduling engine.
//!
//! Assigns people to dates (and, within a date, to one of two teams) from
//! their availability and skill, using a depth-first backtracking search
//! with constraint propagation. Every strictly better schedule found is
//! reported as the search goes on.
//!
//! - **`schedule`**: the engine (grid, propagation, validation, scoring, teams)
//! - **`runner`**: runs the engine off the async runtime and streams progress
//! - **`parser`** / **`display`**: CSV input and schedule output

pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod runner;
pub mod schedule;

pub use config::{EmptySlotPolicy, SchedulerParams};
pub use error::{Result, ScheduleError};
pub use schedule::{CellState, Outcome, ScheduleInput, Solution, SolveStatus, Solver, SolverEvent};
