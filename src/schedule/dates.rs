use chrono::{Datelike, Duration, NaiveDate};

/// Strips the second-slot marker, e.g. "20.09.2021 (2)" -> "20.09.2021"
pub fn base_label(label: &str) -> &str {
    label.split('(').next().unwrap_or(label).trim()
}

/// Two slots are near when they share the same calendar-day label
pub fn is_near(label0: &str, label1: &str) -> bool {
    base_label(label0) == base_label(label1)
}

/// Parses a `DD.MM.YYYY` or `DD.MM.YY` label (two-digit years are in the 2000s)
pub fn parse_date(label: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = base_label(label).split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let mut year: i32 = parts[2].trim().parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Whether two date labels fall into the same calendar week.
/// Labels that don't parse are never in the same week.
pub fn in_same_week(label0: &str, label1: &str) -> bool {
    match (parse_date(label0), parse_date(label1)) {
        (Some(date0), Some(date1)) => week_start(date0) == week_start(date1),
        _ => false,
    }
}
