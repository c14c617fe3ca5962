use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::parser::Roster;
use crate::schedule::{CellState, Outcome, SolveStatus, Solution};

/// Short cell text used in tables and CSV exports
pub fn format_cell(state: CellState) -> &'static str {
    match state {
        CellState::TeamOne => "T1",
        CellState::TeamTwo => "T2",
        CellState::Substitute => "S",
        CellState::Unplanned => "",
    }
}

/// Per-person (planned, available) match counts
pub fn person_statistics(roster: &Roster, solution: &Solution) -> Vec<(usize, usize)> {
    solution
        .schedule
        .iter()
        .zip(&roster.input.availability)
        .map(|(row, available)| {
            let planned = row.iter().filter(|s| s.is_playing()).count();
            (planned, available.iter().filter(|&&a| a).count())
        })
        .collect()
}

/// Writes a schedule as CSV: name, skill, one column per date
pub fn write_schedule<W: Write>(writer: W, roster: &Roster, solution: &Solution) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = vec!["name".to_string(), "skill".to_string()];
    header.extend(roster.input.dates.iter().cloned());
    wtr.write_record(&header)?;

    for (p, row) in solution.schedule.iter().enumerate() {
        let mut record = vec![roster.names[p].clone(), roster.input.skills[p].to_string()];
        record.extend(row.iter().map(|&s| format_cell(s).to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a schedule to a CSV file
pub fn write_schedule_to_file<P: AsRef<Path>>(path: P, roster: &Roster, solution: &Solution) -> Result<()> {
    let file = File::create(path)?;
    write_schedule(file, roster, solution)
}

/// Writes the whole outcome as pretty JSON
pub fn write_outcome_json<P: AsRef<Path>>(path: P, outcome: &Outcome) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, outcome)?;
    Ok(())
}

/// Prints a schedule as a table with per-person totals
pub fn print_schedule(roster: &Roster, solution: &Solution) {
    let name_width = roster.names.iter().map(|n| n.len()).max().unwrap_or(4).max(4);
    let stats = person_statistics(roster, solution);

    print!("{:<width$} ", "Name", width = name_width);
    for date in &roster.input.dates {
        print!("| {:^3} ", short_label(date));
    }
    println!("| Planned/Possible");

    for (p, row) in solution.schedule.iter().enumerate() {
        print!("{:<width$} ", roster.names[p], width = name_width);
        for &state in row {
            print!("| {:^3} ", format_cell(state));
        }
        println!("| {}/{}", stats[p].0, stats[p].1);
    }
}

/// Prints the final status line of a run
pub fn print_outcome(outcome: &Outcome) {
    println!("\n=== Search finished ===");
    match outcome.status {
        SolveStatus::Success => println!("Status: solved"),
        SolveStatus::NoSolution => println!("Status: no schedule satisfies all constraints"),
        SolveStatus::Cancelled => println!("Status: cancelled"),
    }
    println!(
        "Iterations: {}, complete schedules seen: {}",
        outcome.iterations, outcome.solutions_found
    );
    if let Some(best) = &outcome.best {
        println!("Best score: {:.3}", best.score);
    }
}

/// Day and month of a date label, e.g. "20.09.2021 (2)" -> "20.09"
fn short_label(label: &str) -> String {
    let mut parts = label.split('.');
    match (parts.next(), parts.next()) {
        (Some(day), Some(month)) => format!("{}.{}", day.trim(), month.trim()),
        _ => label.to_string(),
    }
}
