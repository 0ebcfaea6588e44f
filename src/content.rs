//! Content store: loads place and visit records from markdown files.
//!
//! ## Directory Structure
//!
//! ```text
//! src/                                  # Content root (config: dir.input)
//! ├── places/
//! │   ├── cafe-central.md               # One file per place
//! │   └── prater.md
//! └── visits/
//!     ├── 2023-05-01-cafe-central.md    # YYYY-MM-DD-slug, one file per visit
//!     └── 2024-01-05-prater.md
//! ```
//!
//! Each file starts with a YAML front-matter block delimited by `---` lines,
//! followed by a markdown body:
//!
//! ```text
//! ---
//! date: 2024-01-05
//! place: prater
//! ratings:
//!   food: 4
//!   vibe: 5
//! ---
//! Rode the Riesenrad twice.
//! ```
//!
//! Front-matter is decoded into [`Place`] / [`Visit`] here, at the boundary,
//! so the collection builders only ever see typed records. Visit dates are
//! kept as written and parsed by the builders, which own the fail-fast
//! policy for invalid dates.

use crate::filters::markdown_to_html;
use crate::types::{Place, Record, Visit};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No front-matter block in {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Logical content types, each stored in its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Places,
    Visits,
}

impl ContentType {
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentType::Places => "places",
            ContentType::Visits => "visits",
        }
    }
}

/// Read-only access to the records of one build.
///
/// The collection builders and the year index take a source as a parameter
/// instead of scanning directories themselves; a source is loaded once per
/// build and dropped afterwards.
pub trait RecordSource {
    /// All loaded records, places and visits, in load order.
    fn records(&self) -> &[Record];

    /// Identifiers (file stems) of every visit record.
    fn visit_ids(&self) -> Vec<&str> {
        self.records()
            .iter()
            .filter_map(Record::as_visit)
            .map(|v| v.id.as_str())
            .collect()
    }
}

/// Records loaded from a content directory, or supplied directly.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    records: Vec<Record>,
}

impl RecordSource for ContentStore {
    fn records(&self) -> &[Record] {
        &self.records
    }
}

impl ContentStore {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load `places/*.md` then `visits/*.md` under `root`.
    ///
    /// Files are read in filename order. A missing content-type directory
    /// contributes no records.
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        let mut records = Vec::new();

        for path in markdown_files(&root.join(ContentType::Places.dir_name()))? {
            records.push(Record::Place(load_place(&path)?));
        }
        for path in markdown_files(&root.join(ContentType::Visits.dir_name()))? {
            records.push(Record::Visit(load_visit(&path)?));
        }

        tracing::debug!(root = %root.display(), records = records.len(), "content loaded");
        Ok(Self { records })
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.records.iter().filter_map(Record::as_place)
    }

    pub fn visits(&self) -> impl Iterator<Item = &Visit> {
        self.records.iter().filter_map(Record::as_visit)
    }
}

/// Sorted `.md` files directly inside `dir`; empty if `dir` does not exist.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn load_place(path: &Path) -> Result<Place, ContentError> {
    let (mut place, body): (Place, String) = read_record(path)?;
    if place.slug.is_empty() {
        place.slug = file_stem(path);
    }
    place.html = markdown_to_html(&body);
    place.body = body;
    tracing::debug!(slug = %place.slug, "loaded place");
    Ok(place)
}

fn load_visit(path: &Path) -> Result<Visit, ContentError> {
    let (mut visit, body): (Visit, String) = read_record(path)?;
    visit.id = file_stem(path);
    visit.html = markdown_to_html(&body);
    visit.body = body;
    tracing::debug!(id = %visit.id, place = %visit.place, "loaded visit");
    Ok(visit)
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<(T, String), ContentError> {
    let content = fs::read_to_string(path)?;
    let (front_matter, body) = split_front_matter(&content)
        .ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;
    let record = serde_yaml::from_str(front_matter).map_err(|source| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((record, body.to_string()))
}

/// Split `---\n<yaml>\n---\n<body>` into its YAML and body parts.
///
/// Tolerates CRLF line endings and a closing delimiter at end of file.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let front_matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((front_matter, body));
        }
        offset += line.len();
    }
    None
}
