pub mod types;
pub mod grid;
pub mod dates;
pub mod context;
pub mod propagate;
pub mod validate;
pub mod guess;
pub mod score;
pub mod teams;
pub mod engine;

pub use types::{Cell, CellState, Guess, Outcome, ScheduleInput, Solution, SolveStatus, SolverEvent};
pub use grid::Grid;
pub use context::SolverContext;
pub use engine::{solve_collect, Solver};
