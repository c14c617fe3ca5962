use rand::seq::SliceRandom;
use rand::Rng;

use super::context::SolverContext;
use super::grid::Grid;
use super::types::{Cell, CellState};

/// Splits the people of each slot into two teams.
///
/// People are sorted by skill (ties in random order) and labeled alternately,
/// so skilled players end up on both teams. Available people who don't play a
/// booked slot are substitutes; everybody else is unplanned.
pub fn place_teams<R: Rng + ?Sized>(
    ctx: &SolverContext,
    grid: &Grid,
    rng: &mut R,
) -> Vec<Vec<CellState>> {
    let mut schedule = vec![vec![CellState::Unplanned; grid.dates()]; grid.people()];

    for d in 0..grid.dates() {
        let mut players: Vec<usize> = (0..grid.people())
            .filter(|&p| grid.get(p, d) == Cell::Assigned)
            .collect();
        if players.is_empty() {
            continue;
        }

        // Shuffle first so the stable sort breaks skill ties randomly
        players.shuffle(rng);
        players.sort_by_key(|&p| ctx.skills[p]);

        for (i, &p) in players.iter().enumerate() {
            schedule[p][d] = if i % 2 == 0 {
                CellState::TeamOne
            } else {
                CellState::TeamTwo
            };
        }

        for p in 0..grid.people() {
            if ctx.availability[p][d] && grid.get(p, d) != Cell::Assigned {
                schedule[p][d] = CellState::Substitute;
            }
        }
    }

    schedule
}
