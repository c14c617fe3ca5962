use super::context::SolverContext;
use super::grid::Grid;
use super::types::{Cell, Guess};

/// Branching score of an undecided cell; the smallest score is branched on first
pub fn cell_score(ctx: &SolverContext, grid: &Grid, person: usize, slot: usize) -> i64 {
    let person_possible = grid.person_possible(person).min(ctx.max_matches_per_person + 2);
    -(person_possible as i64) - grid.slot_possible(slot) as i64
}

/// Picks the cell to branch on and returns its two trial values, `true` first.
///
/// Ties go to the first cell in person-major order. Empty when the grid has
/// no undecided cell.
pub fn candidates(ctx: &SolverContext, grid: &Grid) -> Vec<Guess> {
    let mut best: Option<(i64, usize, usize)> = None;

    for p in 0..grid.people() {
        for d in 0..grid.dates() {
            if grid.get(p, d) != Cell::Unknown {
                continue;
            }
            let score = cell_score(ctx, grid, p, d);
            if best.map_or(true, |(best_score, _, _)| score < best_score) {
                best = Some((score, p, d));
            }
        }
    }

    match best {
        Some((_, person, slot)) => vec![
            Guess { person, slot, value: true },
            Guess { person, slot, value: false },
        ],
        None => Vec::new(),
    }
}
