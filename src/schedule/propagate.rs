use super::context::SolverContext;
use super::grid::Grid;
use super::types::Cell;

/// Applies the forward-inference rules once, in fixed order.
///
/// This is a single pass, not a fixpoint: a rule may enable an earlier one
/// without it being re-run. Only undecided cells are ever changed.
pub fn propagate(ctx: &SolverContext, grid: &mut Grid) {
    let capacity = ctx.capacity();

    // 1. Full slots: nobody else can join
    for d in 0..grid.dates() {
        if grid.slot_assigned(d) == capacity {
            grid.decide_slot(d, Cell::Excluded);
        }
    }

    // 2. Exactly `capacity` people still possible: all of them play
    for d in 0..grid.dates() {
        if grid.slot_possible(d) == capacity {
            grid.decide_slot(d, Cell::Assigned);
        }
    }

    // 3. No two matches on the same day
    for p in 0..grid.people() {
        for d in 0..grid.dates() {
            if grid.get(p, d) != Cell::Assigned {
                continue;
            }
            if d > 0 && ctx.is_near(d, d - 1) {
                grid.decide(p, d - 1, Cell::Excluded);
            }
            if d + 1 < grid.dates() && ctx.is_near(d, d + 1) {
                grid.decide(p, d + 1, Cell::Excluded);
            }
        }
    }

    // 4. People over their maximum get nothing more
    for p in 0..grid.people() {
        if grid.person_assigned(p) > ctx.max_matches_per_person {
            grid.decide_person(p, Cell::Excluded);
        }
    }

    // 5. People with only their minimum left possible play all of it
    for p in 0..grid.people() {
        if grid.person_possible(p) == ctx.min_matches[p] {
            grid.decide_person(p, Cell::Assigned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerParams;
    use crate::schedule::types::ScheduleInput;

    fn context(people: usize, dates: &[&str], capacity: usize, min_matches_cap: usize) -> SolverContext {
        SolverContext::new(
            ScheduleInput {
                availability: vec![vec![true; dates.len()]; people],
                skills: vec![1; people],
                dates: dates.iter().map(|d| d.to_string()).collect(),
            },
            SchedulerParams {
                capacity,
                min_skill_sum: 0,
                min_matches_cap,
                ..SchedulerParams::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_full_slot_excludes_rest() {
        let ctx = context(4, &["01.10.22", "08.10.22"], 2, 0);
        let mut grid = Grid::new(4, 2);
        grid.set(0, 0, Cell::Assigned);
        grid.set(1, 0, Cell::Assigned);

        propagate(&ctx, &mut grid);

        assert_eq!(grid.get(2, 0), Cell::Excluded);
        assert_eq!(grid.get(3, 0), Cell::Excluded);
        assert_eq!(grid.get(2, 1), Cell::Unknown);
    }

    #[test]
    fn test_exact_possible_forces_slot() {
        let ctx = context(3, &["01.10.22", "08.10.22"], 2, 0);
        let mut grid = Grid::new(3, 2);
        grid.set(2, 1, Cell::Excluded);

        propagate(&ctx, &mut grid);

        assert_eq!(grid.get(0, 1), Cell::Assigned);
        assert_eq!(grid.get(1, 1), Cell::Assigned);
        assert_eq!(grid.get(0, 0), Cell::Unknown);
    }

    #[test]
    fn test_same_day_neighbours_excluded() {
        let ctx = context(4, &["01.10.22", "01.10.22 (2)", "02.10.22"], 3, 0);
        let mut grid = Grid::new(4, 3);
        grid.set(0, 1, Cell::Assigned);

        propagate(&ctx, &mut grid);

        assert_eq!(grid.get(0, 0), Cell::Excluded);
        // Different day, same week: still allowed
        assert_eq!(grid.get(0, 2), Cell::Unknown);
    }

    #[test]
    fn test_adjacency_never_flips_assigned_cells() {
        let ctx = context(4, &["01.10.22", "01.10.22 (2)"], 3, 0);
        let mut grid = Grid::new(4, 2);
        grid.set(0, 0, Cell::Assigned);
        grid.set(0, 1, Cell::Assigned);

        propagate(&ctx, &mut grid);

        assert_eq!(grid.get(0, 0), Cell::Assigned);
        assert_eq!(grid.get(0, 1), Cell::Assigned);
    }

    #[test]
    fn test_over_cap_person_excluded() {
        // max = round(4 * 1 / 4) + 1 = 2
        let ctx = context(4, &["01.10.22", "08.10.22", "15.10.22", "22.10.22"], 1, 0);
        assert_eq!(ctx.max_matches_per_person, 2);

        let mut at_cap = Grid::new(4, 4);
        at_cap.set(0, 0, Cell::Assigned);
        at_cap.set(0, 1, Cell::Assigned);
        propagate(&ctx, &mut at_cap);
        assert_eq!(at_cap.get(0, 2), Cell::Unknown);

        let mut over_cap = Grid::new(4, 4);
        over_cap.set(0, 0, Cell::Assigned);
        over_cap.set(0, 1, Cell::Assigned);
        over_cap.set(0, 2, Cell::Assigned);
        propagate(&ctx, &mut over_cap);
        assert_eq!(over_cap.get(0, 3), Cell::Excluded);
    }

    #[test]
    fn test_minimum_possible_forces_person() {
        let ctx = context(6, &["01.10.22", "08.10.22", "15.10.22"], 3, 2);
        let mut grid = Grid::new(6, 3);
        grid.set(0, 0, Cell::Excluded);

        propagate(&ctx, &mut grid);

        assert_eq!(grid.get(0, 1), Cell::Assigned);
        assert_eq!(grid.get(0, 2), Cell::Assigned);
        assert_eq!(grid.get(1, 0), Cell::Unknown);
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let ctx = context(8, &["01.10.22"], 8, 5);
        let mut grid = Grid::new(8, 1);
        grid.set(0, 0, Cell::Assigned);

        propagate(&ctx, &mut grid);
        let once = grid.clone();
        propagate(&ctx, &mut grid);

        assert_eq!(grid, once);
        assert!(grid.is_filled());
    }

    #[test]
    fn test_single_pass_is_not_a_fixpoint() {
        let ctx = context(4, &["01.10.22", "01.10.22 (2)", "08.10.22"], 2, 1);
        let mut grid = Grid::new(4, 3);
        grid.set(0, 0, Cell::Assigned);
        grid.set(1, 0, Cell::Assigned);

        propagate(&ctx, &mut grid);
        // The same-day exclusions leave slot 1 with exactly two candidates,
        // but the forcing rule already ran in this pass.
        assert_eq!(grid.get(0, 1), Cell::Excluded);
        assert_eq!(grid.get(2, 1), Cell::Unknown);

        propagate(&ctx, &mut grid);
        assert_eq!(grid.get(2, 1), Cell::Assigned);
        assert_eq!(grid.get(3, 1), Cell::Assigned);

        let settled = grid.clone();
        propagate(&ctx, &mut grid);
        assert_eq!(grid, settled);
    }
}
