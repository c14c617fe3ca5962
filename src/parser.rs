use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::schedule::ScheduleInput;

/// People names plus the engine input built from an availability sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub names: Vec<String>,
    pub input: ScheduleInput,
}

/// Columns before the first date column: name, skill
const LEADING_COLUMNS: usize = 2;

/// Parses an availability cell
fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "yes" || lower == "true" || lower == "1" || lower == "x"
}

/// Parses a skill level, empty means 0
fn parse_skill(value: &str, line: u64) -> Result<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| ScheduleError::MalformedRecord {
        line,
        reason: format!("skill '{}' is not a non-negative integer", trimmed),
    })
}

/// Loads a roster from a CSV file
///
/// Expected layout:
/// ```text
/// name,skill,20.09.2021,20.09.2021 (2),23.09.2021
/// Alice,2,yes,,x
/// Bob,0,,yes,yes
/// ```
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Roster> {
    let file = std::fs::File::open(csv_path)?;
    read_roster(file)
}

/// Reads a roster from any CSV source
pub fn read_roster<R: Read>(source: R) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        // Row length is checked below to report the line number
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.len() <= LEADING_COLUMNS {
        return Err(ScheduleError::NoDates);
    }
    let dates: Vec<String> = headers
        .iter()
        .skip(LEADING_COLUMNS)
        .map(|h| h.to_string())
        .collect();

    let mut names = Vec::new();
    let mut skills = Vec::new();
    let mut availability = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Skip blank lines
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(ScheduleError::MalformedRecord {
                line,
                reason: format!("{} fields, header has {}", record.len(), headers.len()),
            });
        }

        let name = record.get(0).unwrap_or("").to_string();
        if name.is_empty() {
            return Err(ScheduleError::MalformedRecord {
                line,
                reason: "missing name".to_string(),
            });
        }
        let skill = parse_skill(record.get(1).unwrap_or(""), line)?;

        let row: Vec<bool> = record.iter().skip(LEADING_COLUMNS).map(parse_bool).collect();

        names.push(name);
        skills.push(skill);
        availability.push(row);
    }

    if names.is_empty() {
        return Err(ScheduleError::NoPeople);
    }

    Ok(Roster {
        names,
        input: ScheduleInput {
            availability,
            skills,
            dates,
        },
    })
}
