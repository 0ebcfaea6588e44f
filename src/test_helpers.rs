//! Shared test utilities for the twofold test suite.
//!
//! Provides record constructors, on-disk content writers, and lookup helpers
//! for the collections built from them.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let store = ContentStore::load(tmp.path()).unwrap();
//!
//! let visits = build_visits(store.records()).unwrap();
//! assert_eq!(visit_ids(&visits)[0], "2024-12-31-eiffel");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Location, Place, RatingValue, Ratings, Record, Visit};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// The fixture tree holds 4 places and 6 visits across 2023 and 2024,
/// including two visits on the same day and one place without a city.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Copy `fixtures/content/` into `src/` of a temp project root, the layout
/// the stock config expects.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    let input = tmp.path().join("src");
    std::fs::create_dir_all(&input).unwrap();
    copy_dir_recursive(&fixtures, &input).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `places/<stem>.md` with the given front-matter.
pub fn write_place(root: &Path, stem: &str, front_matter: &str) {
    write_record(&root.join("places"), stem, front_matter);
}

/// Write `visits/<stem>.md` with the given front-matter.
pub fn write_visit(root: &Path, stem: &str, front_matter: &str) {
    write_record(&root.join("visits"), stem, front_matter);
}

fn write_record(dir: &Path, stem: &str, front_matter: &str) {
    std::fs::create_dir_all(dir).unwrap();
    let content = format!("---\n{front_matter}\n---\nBody of {stem}.\n");
    std::fs::write(dir.join(format!("{stem}.md")), content).unwrap();
}

// =========================================================================
// Record constructors
// =========================================================================

pub fn place(slug: &str, title: &str, city: Option<&str>) -> Place {
    Place {
        title: title.to_string(),
        slug: slug.to_string(),
        location: Some(Location {
            city: city.map(str::to_string),
            extra: Default::default(),
        }),
        extra: Default::default(),
        body: String::new(),
        html: String::new(),
    }
}

/// A visit whose identifier is `<date>-<place>`.
pub fn visit(date: &str, place: &str) -> Visit {
    Visit {
        id: format!("{date}-{place}"),
        raw_date: date.to_string(),
        place: place.to_string(),
        ratings: None,
        extra: Default::default(),
        body: String::new(),
        html: String::new(),
    }
}

pub fn ratings(entries: &[(&str, RatingValue)]) -> Ratings {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn score(v: f64) -> RatingValue {
    RatingValue::Score(v)
}

pub fn text(s: &str) -> RatingValue {
    RatingValue::Other(serde_yaml::Value::String(s.to_string()))
}

pub fn place_records(places: Vec<Place>) -> Vec<Record> {
    places.into_iter().map(Record::Place).collect()
}

pub fn visit_records(visits: Vec<Visit>) -> Vec<Record> {
    visits.into_iter().map(Record::Visit).collect()
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn visit_ids<'a>(visits: &[&'a Visit]) -> Vec<&'a str> {
    visits.iter().map(|v| v.id.as_str()).collect()
}

pub fn place_titles<'a>(places: &[&'a Place]) -> Vec<&'a str> {
    places.iter().map(|p| p.title.as_str()).collect()
}
