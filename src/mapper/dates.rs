//! Publication date parsing

use chrono::{DateTime, NaiveDate, Utc};

/// Parse an FDC publication date ("10/31/2024") to midnight UTC
///
/// Month and day may be one or two digits; the year must be four digits.
/// Anything else, including surrounding whitespace, yields `None`.
pub fn parse_publication_date(date_str: &str) -> Option<DateTime<Utc>> {
    let mut parts = date_str.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let well_formed = [(month, 1..=2), (day, 1..=2), (year, 4..=4)]
        .into_iter()
        .all(|(part, width)| width.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
