//! Depth-first backtracking search over the assignment grid.
//!
//! The search keeps an explicit stack of grid snapshots. A frame without a
//! guess starts a new branching layer on its grid; a frame with a guess is a
//! fallback point where the next alternative after that guess is tried.
//!
//! Each iteration:
//! 1. pops a frame and recomputes the two candidate guesses of its grid,
//! 2. picks the next guess (or drops the frame when all were tried),
//! 3. pushes a copy of the unmodified grid as fallback point,
//! 4. applies the guess and propagates,
//! 5. drops invalid grids, reports complete ones that beat the best score,
//!    and pushes incomplete ones as a new layer.
//!
//! The search keeps going after the first solution, looking for better ones,
//! until the stack is empty or the run is cancelled.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::context::SolverContext;
use super::grid::Grid;
use super::guess::candidates;
use super::propagate::propagate;
use super::score::score;
use super::teams::place_teams;
use super::types::{Guess, Outcome, ScheduleInput, Solution, SolveStatus, SolverEvent};
use super::validate::is_valid;
use crate::config::SchedulerParams;
use crate::error::{Result, ScheduleError};

/// Iterations between two progress log lines
const PROGRESS_INTERVAL: u64 = 10_000;

/// Stack entry: a grid snapshot and the guess last tried on it
#[derive(Debug, Clone)]
struct Frame {
    grid: Grid,
    last_guess: Option<Guess>,
}

/// One independent solver run
pub struct Solver {
    ctx: SolverContext,
    rng: StdRng,
    best: Option<Solution>,
    iterations: u64,
    solutions_found: u64,
}

impl Solver {
    /// Validates the input. Nothing is searched yet.
    pub fn new(input: ScheduleInput, params: SchedulerParams) -> Result<Self> {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ctx = SolverContext::new(input, params)?;

        Ok(Self {
            ctx,
            rng,
            best: None,
            iterations: 0,
            solutions_found: 0,
        })
    }

    pub fn context(&self) -> &SolverContext {
        &self.ctx
    }

    /// Runs the search to completion or cancellation.
    ///
    /// `on_event` receives every strict improvement and then exactly one
    /// `Finished` event carrying the same outcome that is returned.
    ///
    /// An `Err` means a broken search frame aborted the run. No `Finished`
    /// event is sent in that case; the error is the terminal result.
    pub fn solve<F>(mut self, cancel: &CancellationToken, mut on_event: F) -> Result<Outcome>
    where
        F: FnMut(SolverEvent),
    {
        info!(
            people = self.ctx.people(),
            dates = self.ctx.dates(),
            max_matches_per_person = self.ctx.max_matches_per_person,
            min_matches = ?self.ctx.min_matches,
            "Starting search"
        );

        let initial = Grid::from_availability(&self.ctx.availability);
        let mut stack: Vec<Frame> = Vec::new();
        if initial.is_filled() {
            // Nothing to branch on
            if is_valid(&self.ctx, &initial) {
                self.record_solution(&initial, &mut on_event);
            }
        } else {
            stack.push(Frame {
                grid: initial,
                last_guess: None,
            });
        }

        let mut cancelled = false;
        let mut min_stack = usize::MAX;

        loop {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let Some(Frame { mut grid, last_guess }) = stack.pop() else {
                break;
            };

            self.iterations += 1;
            min_stack = min_stack.min(stack.len());
            if self.iterations % PROGRESS_INTERVAL == 0 {
                debug!(
                    iterations = self.iterations,
                    stack = stack.len(),
                    min_stack,
                    "Search progress"
                );
                min_stack = usize::MAX;
            }

            let Some(guess) = next_guess(&self.ctx, &grid, last_guess)? else {
                // Every alternative of this cell was tried
                continue;
            };

            stack.push(Frame {
                grid: grid.clone(),
                last_guess: Some(guess),
            });
            grid.set(guess.person, guess.slot, guess.cell());
            propagate(&self.ctx, &mut grid);

            if !is_valid(&self.ctx, &grid) {
                continue;
            }
            if grid.is_filled() {
                self.record_solution(&grid, &mut on_event);
            } else {
                stack.push(Frame {
                    grid,
                    last_guess: None,
                });
            }
        }

        let status = if cancelled {
            SolveStatus::Cancelled
        } else if self.best.is_some() {
            SolveStatus::Success
        } else {
            SolveStatus::NoSolution
        };
        info!(
            ?status,
            iterations = self.iterations,
            solutions_found = self.solutions_found,
            best_score = self.best.as_ref().map(|s| s.score),
            "Search finished"
        );

        let outcome = Outcome {
            status,
            best: self.best,
            iterations: self.iterations,
            solutions_found: self.solutions_found,
        };
        on_event(SolverEvent::Finished(outcome.clone()));
        Ok(outcome)
    }

    /// Scores a complete valid grid and reports it if it beats the best one
    fn record_solution<F>(&mut self, grid: &Grid, on_event: &mut F)
    where
        F: FnMut(SolverEvent),
    {
        self.solutions_found += 1;
        let current = score(&self.ctx, grid);
        let improves = self.best.as_ref().map_or(true, |best| current < best.score);
        if !improves {
            return;
        }

        debug!(score = current, iterations = self.iterations, "Found better schedule");
        let solution = Solution {
            score: current,
            schedule: place_teams(&self.ctx, grid, &mut self.rng),
        };
        self.best = Some(solution.clone());
        on_event(SolverEvent::Improved(solution));
    }
}

/// The guess to try on a popped frame's grid.
///
/// A fresh layer starts with the first candidate. A fallback frame moves on to
/// the candidate after its last guess, or yields `None` once all were tried.
fn next_guess(ctx: &SolverContext, grid: &Grid, last_guess: Option<Guess>) -> Result<Option<Guess>> {
    let guesses = candidates(ctx, grid);
    match last_guess {
        None => guesses
            .first()
            .copied()
            .map(Some)
            .ok_or(ScheduleError::NothingToBranch),
        Some(last) => {
            let index = guesses
                .iter()
                .position(|g| *g == last)
                .ok_or(ScheduleError::InconsistentFrame(last))?;
            Ok(guesses.get(index + 1).copied())
        }
    }
}

/// Runs a solver on the calling thread and collects every event.
pub fn solve_collect(
    input: ScheduleInput,
    params: SchedulerParams,
    cancel: &CancellationToken,
) -> Result<(Outcome, Vec<SolverEvent>)> {
    let mut events = Vec::new();
    let outcome = Solver::new(input, params)?.solve(cancel, |event| events.push(event))?;
    Ok((outcome, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Cell, CellState};

    fn uniform_input(people: usize, dates: &[&str]) -> ScheduleInput {
        ScheduleInput {
            availability: vec![vec![true; dates.len()]; people],
            skills: vec![1; people],
            dates: dates.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_single_full_slot() {
        let (outcome, events) = solve_collect(
            uniform_input(8, &["01.10.22"]),
            SchedulerParams::default(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(outcome.status, SolveStatus::Success);
        assert_eq!(events.len(), 2);
        let best = outcome.best.unwrap();
        assert!(best.schedule.iter().all(|row| row[0] != CellState::Unplanned));
        assert!(matches!(events.last(), Some(SolverEvent::Finished(_))));
    }

    #[test]
    fn test_too_few_people() {
        let (outcome, events) = solve_collect(
            uniform_input(4, &["01.10.22"]),
            SchedulerParams::default(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(outcome.status, SolveStatus::NoSolution);
        assert!(outcome.best.is_none());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_already_decided_grid() {
        // Nobody is available: the initial grid is complete but cannot be filled
        let input = ScheduleInput {
            availability: vec![vec![false]; 2],
            skills: vec![1; 2],
            dates: vec!["01.10.22".to_string()],
        };
        let (strict, _) =
            solve_collect(input.clone(), SchedulerParams::default(), &CancellationToken::new())
                .unwrap();
        assert_eq!(strict.status, SolveStatus::NoSolution);
        assert_eq!(strict.iterations, 0);

        let params = SchedulerParams {
            empty_slot_policy: crate::config::EmptySlotPolicy::AllowUnfillable,
            ..SchedulerParams::default()
        };
        let (relaxed, _) = solve_collect(input, params, &CancellationToken::new()).unwrap();
        assert_eq!(relaxed.status, SolveStatus::Success);
        assert_eq!(relaxed.solutions_found, 1);
        let best = relaxed.best.unwrap();
        assert!(best.schedule.iter().all(|row| row[0] == CellState::Unplanned));
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (outcome, events) =
            solve_collect(uniform_input(8, &["01.10.22"]), SchedulerParams::default(), &cancel)
                .unwrap();

        assert_eq!(outcome.status, SolveStatus::Cancelled);
        assert!(outcome.best.is_none());
        assert_eq!(outcome.iterations, 0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_next_guess_walks_alternatives() {
        let solver = Solver::new(uniform_input(8, &["01.10.22"]), SchedulerParams::default()).unwrap();
        let ctx = solver.context();
        let grid = Grid::from_availability(&ctx.availability);

        let first = next_guess(ctx, &grid, None).unwrap().unwrap();
        assert_eq!(first, Guess { person: 0, slot: 0, value: true });
        let second = next_guess(ctx, &grid, Some(first)).unwrap().unwrap();
        assert_eq!(second, Guess { person: 0, slot: 0, value: false });
        assert_eq!(next_guess(ctx, &grid, Some(second)).unwrap(), None);
    }

    #[test]
    fn test_broken_frames_are_errors() {
        let solver = Solver::new(uniform_input(8, &["01.10.22"]), SchedulerParams::default()).unwrap();
        let ctx = solver.context();

        let mut filled = Grid::from_availability(&ctx.availability);
        filled.decide_slot(0, Cell::Assigned);
        assert!(matches!(
            next_guess(ctx, &filled, None),
            Err(ScheduleError::NothingToBranch)
        ));

        let grid = Grid::from_availability(&ctx.availability);
        let stale = Guess { person: 3, slot: 0, value: true };
        assert!(matches!(
            next_guess(ctx, &grid, Some(stale)),
            Err(ScheduleError::InconsistentFrame(guess)) if guess == stale
        ));
    }

    #[test]
    fn test_invalid_input_fails_before_search() {
        let input = ScheduleInput {
            availability: vec![vec![true, true], vec![true]],
            skills: vec![1, 1],
            dates: vec!["a".to_string(), "b".to_string()],
        };
        assert!(matches!(
            Solver::new(input, SchedulerParams::default()),
            Err(ScheduleError::RaggedRow { .. })
        ));
    }
}
