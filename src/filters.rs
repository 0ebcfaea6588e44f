//! Derived-value functions exposed to the templates.
//!
//! These are pure and called per record while pages render; nothing here is
//! precomputed or cached. Template name → function:
//!
//! | Template filter | Function |
//! |---|---|
//! | `getPlace` | [`get_place`] |
//! | `averageRating` | [`average_rating`] |
//! | `formatDate` | [`format_date`] |
//! | `dateSlug` | [`date_slug`] |
//! | `getYear` / `getDay` / `getMonth` | [`get_year`] / [`get_day`] / [`get_month`] |
//! | `uniqueCities` | [`unique_cities`] |
//! | `getYears` | [`get_years`] |
//! | `currentYear` | [`current_year`] |
//! | `stars` | [`stars`] |
//! | `markdown` | [`markdown`] |
//!
//! Date output is pinned to English month names regardless of the host
//! locale.

use crate::collections::VisitsByYear;
use crate::types::{Place, Ratings};
use chrono::{Datelike, Local, NaiveDate};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::BTreeSet;

/// Number of units a star rating always renders.
pub const STAR_COUNT: u32 = 5;

/// First place whose slug matches.
pub fn get_place<'a>(
    places: impl IntoIterator<Item = &'a Place>,
    slug: &str,
) -> Option<&'a Place> {
    places.into_iter().find(|p| p.slug == slug)
}

/// Mean of the numeric ratings; 0 when there are none.
///
/// Non-numeric entries (`"n/a"`, booleans, nested maps) are skipped, never
/// reported.
pub fn average_rating(ratings: Option<&Ratings>) -> f64 {
    let Some(ratings) = ratings else {
        return 0.0;
    };
    let (sum, count) = ratings
        .values()
        .filter_map(|v| v.score())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// `January 5, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `2024-01-05`
pub fn date_slug(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn get_year(date: NaiveDate) -> i32 {
    date.year()
}

/// Day of the month, 1-based.
pub fn get_day(date: NaiveDate) -> u32 {
    date.day()
}

/// Three-letter uppercase month, e.g. `JAN`.
pub fn get_month(date: NaiveDate) -> String {
    date.format("%b").to_string().to_uppercase()
}

/// Distinct cities across places. Places without a city, or with an empty
/// one, are skipped.
pub fn unique_cities<'a>(places: impl IntoIterator<Item = &'a Place>) -> BTreeSet<String> {
    places
        .into_iter()
        .filter_map(Place::city)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .collect()
}

/// Years present in a `visitsByYear` collection, newest first.
pub fn get_years(visits_by_year: &VisitsByYear<'_>) -> Vec<String> {
    visits_by_year.keys().rev().map(|y| y.to_string()).collect()
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// How a rating splits into full, half and empty stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u32,
    pub half: bool,
    pub empty: u32,
}

impl StarRating {
    /// Split a 0–5 rating. Out-of-range and NaN ratings are clamped first so
    /// the three parts always add up to [`STAR_COUNT`].
    pub fn from_rating(rating: f64) -> Self {
        let max = f64::from(STAR_COUNT);
        let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, max) };
        let full = rating.floor() as u32;
        let half = rating % 1.0 >= 0.5;
        let empty = STAR_COUNT - full - u32::from(half);
        Self { full, half, empty }
    }

    pub fn to_html(self) -> Markup {
        html! {
            @for _ in 0..self.full {
                span class="star full" { "★" }
            }
            @if self.half {
                span class="star half" { "★" }
            }
            @for _ in 0..self.empty {
                span class="star empty" { "☆" }
            }
        }
    }
}

/// Star markup for a rating.
pub fn stars(rating: f64) -> Markup {
    StarRating::from_rating(rating).to_html()
}

/// CommonMark to HTML.
pub fn markdown_to_html(body: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(body));
    out
}

/// Rendered markdown, inserted unescaped.
pub fn markdown(body: &str) -> Markup {
    PreEscaped(markdown_to_html(body))
}
