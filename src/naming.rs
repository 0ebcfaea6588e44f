//! Filename parsing for the `YYYY-MM-DD-slug` visit convention.
//!
//! Visit files are named after the day of the visit followed by a slug:
//! - `2024-01-05-cafe-central` → year `2024`, date 2024-01-05, slug `cafe-central`
//! - `2024-01-05` → date only, empty slug
//! - `notes` → no date prefix
//!
//! The year index only trusts the first four characters; the full prefix is
//! used by `check` to compare a file's name against its front-matter date.

use chrono::NaiveDate;

/// Result of parsing a visit identifier like `2024-01-05-cafe-central`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVisitId {
    /// Date prefix, if the first ten characters form a valid `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    /// Everything after the date prefix and its dash. For identifiers
    /// without a date prefix this is the full input.
    pub slug: String,
}

/// The leading four characters of an identifier, if they are all digits.
///
/// - `"2023-05-01-foo"` → `Some("2023")`
/// - `"invalid-file"` → `None`
/// - `"202"` → `None`
pub fn year_prefix(id: &str) -> Option<&str> {
    let prefix = id.get(..4)?;
    prefix.bytes().all(|b| b.is_ascii_digit()).then_some(prefix)
}

/// Parse a visit identifier following the `YYYY-MM-DD-slug` convention.
pub fn parse_visit_id(id: &str) -> ParsedVisitId {
    if let Some(prefix) = id.get(..10)
        && let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
    {
        let rest = &id[10..];
        if rest.is_empty() || rest.starts_with('-') {
            return ParsedVisitId {
                date: Some(date),
                slug: rest.trim_start_matches('-').to_string(),
            };
        }
    }
    ParsedVisitId {
        date: None,
        slug: id.to_string(),
    }
}
