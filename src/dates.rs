//! Visit date parsing.
//!
//! Front-matter dates are usually plain calendar dates (`2024-01-05`) and are
//! taken as-is: no timezone shift can move them to a neighbouring day or year.
//! Full timestamps are accepted too; ones carrying an offset are converted to
//! the local calendar, so every accessor sees the same wall-clock date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date: {value:?}")]
pub struct InvalidDateError {
    pub value: String,
}

/// YAML timestamps may separate the offset with a space.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a front-matter date into a local wall-clock timestamp.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, YAML timestamps with a
/// space-separated offset, and offset-less
/// `YYYY-MM-DD[T ]HH:MM:SS` timestamps. Anything else is an error.
pub fn parse_date(raw: &str) -> Result<NaiveDateTime, InvalidDateError> {
    let value = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    if let Some(dt) = DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        OFFSET_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    }) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| InvalidDateError {
            value: raw.to_string(),
        })
}
