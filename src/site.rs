//! Site build: config + content in, generated data files out.
//!
//! [`Site::load`] reads `config.toml` and the content tree once. From there:
//!
//! - [`Site::build`] writes `site-data.json` (all four collections, the year
//!   index, the path prefix and the renderer's directory layout) and
//!   `years.json` into the data directory,
//!   where the rendering engine picks them up.
//! - [`Site::check`] builds the same collections in memory and reports
//!   content problems that do not stop a build: visits pointing at a place
//!   that does not exist, places sharing a slug, and visit files whose name
//!   disagrees with their front-matter date.

use crate::collections::Collections;
use crate::config::{self, ConfigError, DirConfig, SiteConfig};
use crate::content::{ContentError, ContentStore, RecordSource};
use crate::dates::InvalidDateError;
use crate::naming::{parse_visit_id, year_prefix};
use crate::years::year_index;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SITE_DATA_FILENAME: &str = "site-data.json";
pub const YEARS_FILENAME: &str = "years.json";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the rendering engine reads from `site-data.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData<'a> {
    pub path_prefix: &'a str,
    /// Directory layout the renderer reads from and writes to.
    pub dir: &'a DirConfig,
    /// Directories the renderer copies into the output unchanged.
    pub passthrough_copy: &'a [String],
    #[serde(flatten)]
    pub collections: Collections<'a>,
    pub years: Vec<String>,
}

/// What a build produced, for the CLI summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub places: usize,
    pub visits: usize,
    /// `(year, visit count)`, newest year first.
    pub visits_per_year: Vec<(i32, usize)>,
    /// Distinct place slugs that have at least one visit.
    pub visited_places: usize,
    pub years: Vec<String>,
    pub written: Vec<PathBuf>,
}

/// A content problem that does not stop the build.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// A visit references a place slug no place defines.
    UnknownPlace { visit: String, place: String },
    /// More than one place file resolves to the same slug.
    DuplicateSlug { slug: String, count: usize },
    /// The filename year puts the visit in a different year index entry than
    /// its date does.
    YearMismatch {
        visit: String,
        filename_year: String,
        date_year: i32,
    },
    /// The filename date prefix and the front-matter date name different days
    /// of the same year.
    DateMismatch {
        visit: String,
        filename_date: chrono::NaiveDate,
        date: chrono::NaiveDate,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UnknownPlace { visit, place } => {
                write!(f, "{visit}: unknown place {place:?}")
            }
            Finding::DuplicateSlug { slug, count } => {
                write!(f, "slug {slug:?} is used by {count} places")
            }
            Finding::YearMismatch {
                visit,
                filename_year,
                date_year,
            } => write!(
                f,
                "{visit}: filename year {filename_year} but date year {date_year}"
            ),
            Finding::DateMismatch {
                visit,
                filename_date,
                date,
            } => write!(f, "{visit}: filename date {filename_date} but date {date}"),
        }
    }
}

/// A loaded project.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
    pub content: ContentStore,
}

impl Site {
    pub fn load(project_root: &Path) -> Result<Self, BuildError> {
        let config = config::load_config(project_root)?;
        let content = ContentStore::load(&config.dir.input_dir(project_root))?;
        Ok(Self {
            root: project_root.to_path_buf(),
            config,
            content,
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config.dir.data_dir(&self.root)
    }

    pub fn site_data(&self) -> Result<SiteData<'_>, BuildError> {
        Ok(SiteData {
            path_prefix: &self.config.path_prefix,
            dir: &self.config.dir,
            passthrough_copy: &self.config.passthrough.copy,
            collections: Collections::build(&self.content)?,
            years: year_index(&self.content),
        })
    }

    /// Build every collection and write the data files.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let data = self.site_data()?;
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir)?;

        let site_data_path = data_dir.join(SITE_DATA_FILENAME);
        std::fs::write(&site_data_path, serde_json::to_string_pretty(&data)?)?;
        let years_path = data_dir.join(YEARS_FILENAME);
        std::fs::write(&years_path, serde_json::to_string_pretty(&data.years)?)?;
        tracing::debug!(dir = %data_dir.display(), "site data written");

        Ok(BuildSummary {
            places: data.collections.places.len(),
            visits: data.collections.visits.len(),
            visits_per_year: data
                .collections
                .visits_by_year
                .iter()
                .rev()
                .map(|(year, visits)| (*year, visits.len()))
                .collect(),
            visited_places: data.collections.visits_by_place.len(),
            years: data.years,
            written: vec![site_data_path, years_path],
        })
    }

    /// Build in memory and collect content findings.
    ///
    /// Only an unparseable date is an error; everything else is a finding.
    pub fn check(&self) -> Result<Vec<Finding>, BuildError> {
        Collections::build(&self.content)?;
        let findings = check_records(&self.content)?;
        for finding in &findings {
            tracing::warn!("{finding}");
        }
        Ok(findings)
    }
}

/// Content findings for any record source.
pub fn check_records<S: RecordSource + ?Sized>(source: &S) -> Result<Vec<Finding>, BuildError> {
    let records = source.records();
    let mut findings = Vec::new();

    let mut slug_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for place in records.iter().filter_map(|r| r.as_place()) {
        *slug_counts.entry(place.slug.as_str()).or_default() += 1;
    }
    for (slug, count) in &slug_counts {
        if *count > 1 {
            findings.push(Finding::DuplicateSlug {
                slug: slug.to_string(),
                count: *count,
            });
        }
    }

    let known: BTreeSet<&str> = slug_counts.keys().copied().collect();
    for visit in records.iter().filter_map(|r| r.as_visit()) {
        if !known.contains(visit.place.as_str()) {
            findings.push(Finding::UnknownPlace {
                visit: visit.id.clone(),
                place: visit.place.clone(),
            });
        }

        let date = visit.date()?.date();
        if let Some(filename_year) = year_prefix(&visit.id)
            && filename_year.parse::<i32>().ok() != Some(date.year())
        {
            findings.push(Finding::YearMismatch {
                visit: visit.id.clone(),
                filename_year: filename_year.to_string(),
                date_year: date.year(),
            });
        } else if let Some(filename_date) = parse_visit_id(&visit.id).date
            && filename_date != date
        {
            findings.push(Finding::DateMismatch {
                visit: visit.id.clone(),
                filename_date,
                date,
            });
        }
    }

    Ok(findings)
}
