//! Soft-constraint objective of a complete schedule. Lower is better.

use super::context::SolverContext;
use super::grid::Grid;
use super::types::Cell;

/// Weight of the distribution term in the total score
const DISTRIBUTION_WEIGHT: f64 = 0.25;

/// Total score of a complete grid
pub fn score(ctx: &SolverContext, grid: &Grid) -> f64 {
    balance_penalty(ctx, grid) as f64
        + same_week_penalty(ctx, grid) as f64
        + distribution_penalty(grid) * DISTRIBUTION_WEIGHT
}

/// Number of people whose load is one of the two ideal loads.
///
/// NOTE: this counts balanced people, so a better balanced schedule scores
/// higher. Kept as is until the intended direction is settled.
pub fn balance_penalty(ctx: &SolverContext, grid: &Grid) -> usize {
    let (low, high) = ctx.ideal_loads();
    (0..grid.people())
        .filter(|&p| {
            let load = grid.person_assigned(p);
            load == low || load == high
        })
        .count()
}

/// Pairs of matches two slots apart that fall into the same week
pub fn same_week_penalty(ctx: &SolverContext, grid: &Grid) -> usize {
    let mut penalty = 0;
    for p in 0..grid.people() {
        for d in 0..grid.dates().saturating_sub(2) {
            if grid.get(p, d) == Cell::Assigned
                && grid.get(p, d + 2) == Cell::Assigned
                && ctx.in_same_week(d, d + 2)
            {
                penalty += 1;
            }
        }
    }
    penalty
}

/// Average distribution score over all people
pub fn distribution_penalty(grid: &Grid) -> f64 {
    let total: f64 = (0..grid.people())
        .map(|p| {
            let slots: Vec<usize> = grid.assigned_slots(p).collect();
            distribution_score(&slots, grid.dates())
        })
        .sum();
    total / grid.people() as f64
}

/// Mean absolute deviation of the gaps between sorted positions from the
/// uniform gap `max_value / (n - 1)`. Zero for fewer than two positions.
pub fn distribution_score(positions: &[usize], max_value: usize) -> f64 {
    if positions.len() < 2 {
        return 0.0;
    }
    let gaps = positions.len() - 1;
    let ideal = max_value as f64 / gaps as f64;
    let error: f64 = positions
        .windows(2)
        .map(|pair| ((pair[1] as f64 - pair[0] as f64) - ideal).abs())
        .sum();
    error / gaps as f64
}
