use super::context::SolverContext;
use super::grid::Grid;
use super::types::Cell;
use crate::config::EmptySlotPolicy;

/// Hard constraint a grid can break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    OverCapacity { slot: usize },
    SkillTooLow { slot: usize },
    CannotFill { slot: usize },
    SameDay { person: usize, slot: usize },
    TooManyMatches { person: usize },
    TooFewMatches { person: usize },
}

/// Finds the first broken hard constraint, if any
pub fn first_violation(ctx: &SolverContext, grid: &Grid) -> Option<Violation> {
    let capacity = ctx.capacity();

    // 1. At most `capacity` people per slot, and a full slot needs enough skill
    for d in 0..grid.dates() {
        let assigned = grid.slot_assigned(d);
        if assigned > capacity {
            return Some(Violation::OverCapacity { slot: d });
        }
        if assigned == capacity {
            let skill: u32 = (0..grid.people())
                .filter(|&p| grid.get(p, d) == Cell::Assigned)
                .map(|p| ctx.skills[p])
                .sum();
            if skill < ctx.params.min_skill_sum {
                return Some(Violation::SkillTooLow { slot: d });
            }
        }
    }

    // 2. Every slot can still be filled, unless it was never fillable and
    //    is allowed to stay empty
    for d in 0..grid.dates() {
        let may_stay_empty = ctx.params.empty_slot_policy == EmptySlotPolicy::AllowUnfillable
            && !ctx.fillable_slots[d];
        if may_stay_empty {
            if grid.slot_assigned(d) > 0 {
                return Some(Violation::CannotFill { slot: d });
            }
        } else if grid.slot_possible(d) < capacity {
            return Some(Violation::CannotFill { slot: d });
        }
    }

    // 3. No two matches on the same day
    for p in 0..grid.people() {
        for d in 0..grid.dates().saturating_sub(1) {
            if grid.get(p, d) == Cell::Assigned
                && grid.get(p, d + 1) == Cell::Assigned
                && ctx.is_near(d, d + 1)
            {
                return Some(Violation::SameDay { person: p, slot: d });
            }
        }
    }

    // 4. Nobody above the maximum
    for p in 0..grid.people() {
        if grid.person_assigned(p) > ctx.max_matches_per_person {
            return Some(Violation::TooManyMatches { person: p });
        }
    }

    // 5. Everybody can still reach their minimum
    for p in 0..grid.people() {
        if grid.person_possible(p) < ctx.min_matches[p] {
            return Some(Violation::TooFewMatches { person: p });
        }
    }

    None
}

pub fn is_valid(ctx: &SolverContext, grid: &Grid) -> bool {
    first_violation(ctx, grid).is_none()
}
