use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// How the validator treats a slot that can no longer reach capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySlotPolicy {
    /// Every slot must keep at least `capacity` possible people.
    #[default]
    Strict,
    /// A slot with fewer than `capacity` available people is never filled:
    /// nobody may be planned on it, so it ends with no possible people.
    AllowUnfillable,
}

/// Fixed parameters of one solver run.
///
/// Loaded from an optional JSON file; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerParams {
    /// People required in a fully booked slot.
    pub capacity: usize,
    /// Minimum summed skill among the people of a full slot.
    pub min_skill_sum: u32,
    /// Upper bound for the per-person minimum number of matches.
    pub min_matches_cap: usize,
    pub empty_slot_policy: EmptySlotPolicy,
    /// Seed for team tie-breaking. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            capacity: 8,
            min_skill_sum: 3,
            min_matches_cap: 5,
            empty_slot_policy: EmptySlotPolicy::Strict,
            seed: None,
        }
    }
}

impl SchedulerParams {
    /// Reads parameters from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let params: SchedulerParams = serde_json::from_reader(file)?;
        params.check()?;
        Ok(params)
    }

    pub fn check(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ScheduleError::InvalidParameter(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
