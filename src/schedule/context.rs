//! Per-run solver state that never changes during a search.
//!
//! Every run owns its own context, so concurrent runs never share
//! parameters or derived quotas.

use chrono::NaiveDate;
use tracing::warn;

use super::dates::{is_near, parse_date, week_start};
use super::types::ScheduleInput;
use crate::config::{EmptySlotPolicy, SchedulerParams};
use crate::error::{Result, ScheduleError};

#[derive(Debug, Clone)]
pub struct SolverContext {
    pub params: SchedulerParams,
    pub availability: Vec<Vec<bool>>,
    pub skills: Vec<u32>,
    pub labels: Vec<String>,
    /// Monday of each slot's week, `None` for unparseable labels
    pub week_starts: Vec<Option<NaiveDate>>,
    /// `near_next[d]`: slots `d` and `d + 1` are on the same day
    pub near_next: Vec<bool>,
    /// Per-person minimum number of matches
    pub min_matches: Vec<usize>,
    pub max_matches_per_person: usize,
    /// Slots with enough available people to ever reach capacity
    pub fillable_slots: Vec<bool>,
}

impl SolverContext {
    /// Checks the input and derives the per-run quotas.
    pub fn new(input: ScheduleInput, params: SchedulerParams) -> Result<Self> {
        params.check()?;
        let ScheduleInput {
            availability,
            skills,
            dates: labels,
        } = input;

        let people = availability.len();
        if people == 0 {
            return Err(ScheduleError::NoPeople);
        }
        let dates = availability[0].len();
        if dates == 0 {
            return Err(ScheduleError::NoDates);
        }
        for (person, row) in availability.iter().enumerate() {
            if row.len() != dates {
                return Err(ScheduleError::RaggedRow {
                    person,
                    expected: dates,
                    found: row.len(),
                });
            }
        }
        if skills.len() != people {
            return Err(ScheduleError::SkillCountMismatch {
                people,
                skills: skills.len(),
            });
        }
        if labels.len() != dates {
            return Err(ScheduleError::DateCountMismatch {
                labels: labels.len(),
                columns: dates,
            });
        }

        let week_starts = labels
            .iter()
            .map(|label| {
                let date = parse_date(label);
                if date.is_none() {
                    warn!(label = label.as_str(), "Date label is not DD.MM.YY[YY], ignoring it for week checks");
                }
                date.map(week_start)
            })
            .collect();

        let near_next = (0..dates)
            .map(|d| d + 1 < dates && is_near(&labels[d], &labels[d + 1]))
            .collect();

        let fillable_slots: Vec<bool> = (0..dates)
            .map(|d| availability.iter().filter(|row| row[d]).count() >= params.capacity)
            .collect();

        // Slots that must stay empty don't count towards anybody's minimum
        let counts_for_minimum = |d: usize| {
            params.empty_slot_policy == EmptySlotPolicy::Strict || fillable_slots[d]
        };
        let min_matches = availability
            .iter()
            .map(|row| {
                let usable = (0..dates).filter(|&d| row[d] && counts_for_minimum(d)).count();
                usable.min(params.min_matches_cap)
            })
            .collect();

        let max_matches_per_person =
            ((dates * params.capacity) as f64 / people as f64).round() as usize + 1;

        Ok(Self {
            params,
            availability,
            skills,
            labels,
            week_starts,
            near_next,
            min_matches,
            max_matches_per_person,
            fillable_slots,
        })
    }

    pub fn people(&self) -> usize {
        self.availability.len()
    }

    pub fn dates(&self) -> usize {
        self.labels.len()
    }

    pub fn capacity(&self) -> usize {
        self.params.capacity
    }

    /// Whether two neighbouring slots share a calendar day
    pub fn is_near(&self, slot0: usize, slot1: usize) -> bool {
        let low = slot0.min(slot1);
        slot0.abs_diff(slot1) == 1 && self.near_next[low]
    }

    pub fn in_same_week(&self, slot0: usize, slot1: usize) -> bool {
        match (self.week_starts[slot0], self.week_starts[slot1]) {
            (Some(week0), Some(week1)) => week0 == week1,
            _ => false,
        }
    }

    /// The two loads counted as balanced: `floor(D * capacity / P)` and one more
    pub fn ideal_loads(&self) -> (usize, usize) {
        let low = self.dates() * self.capacity() / self.people();
        (low, low + 1)
    }
}
