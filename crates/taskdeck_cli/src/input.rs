//! Local wall-clock input parsing.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses `YYYY-MM-DDTHH:MM[:SS]` (a space also works as the separator) as
/// local wall-clock time and converts it to the stored UTC instant.
pub fn parse_local_datetime(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .with_context(|| {
            format!("could not parse `{trimmed}` as a date/time (expected YYYY-MM-DDTHH:MM)")
        })?;

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        // DST fold: both instants show the entered wall-clock time.
        LocalResult::Ambiguous(first, _) => Ok(first.with_timezone(&Utc)),
        LocalResult::None => bail!("`{trimmed}` does not exist in the local time zone"),
    }
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let (year, month) = trimmed
        .split_once('-')
        .with_context(|| format!("could not parse `{trimmed}` as a month (expected YYYY-MM)"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("invalid year in `{trimmed}`"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("invalid month in `{trimmed}`"))?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("`{trimmed}` is not a valid month"))
}
