//! Collection builders: the four views the rendering layer iterates over.
//!
//! | Collection | Shape | Order |
//! |---|---|---|
//! | `places` | `Vec<&Place>` | title, locale-aware |
//! | `visits` | `Vec<&Visit>` | date, newest first |
//! | `visitsByYear` | `year → Vec<&Visit>` | each group newest first |
//! | `visitsByPlace` | `place slug → Vec<&Visit>` | each group newest first |
//!
//! Builders borrow from the record slice and return new sequences; the
//! source order is never touched, so the same records can be reused for
//! another view or another build step. Every sort is stable, so records that
//! tie keep their load order (filename order for the content store).
//!
//! Every visit date is parsed before anything is sorted. The first
//! unparseable date aborts the build with [`InvalidDateError`]; there is no
//! default date and no partial output.

use crate::collate::locale_cmp;
use crate::content::RecordSource;
use crate::dates::InvalidDateError;
use crate::types::{Place, Record, Visit};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

pub type VisitsByYear<'a> = BTreeMap<i32, Vec<&'a Visit>>;
pub type VisitsByPlace<'a> = BTreeMap<String, Vec<&'a Visit>>;

/// All four collections for one build.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections<'a> {
    pub places: Vec<&'a Place>,
    pub visits: Vec<&'a Visit>,
    pub visits_by_year: VisitsByYear<'a>,
    pub visits_by_place: VisitsByPlace<'a>,
}

impl<'a> Collections<'a> {
    pub fn build<S: RecordSource + ?Sized>(source: &'a S) -> Result<Self, InvalidDateError> {
        let records = source.records();
        Ok(Self {
            places: build_places(records),
            visits: build_visits(records)?,
            visits_by_year: build_visits_by_year(records)?,
            visits_by_place: build_visits_by_place(records)?,
        })
    }
}

/// Places sorted by title.
pub fn build_places(records: &[Record]) -> Vec<&Place> {
    let mut places: Vec<&Place> = records.iter().filter_map(Record::as_place).collect();
    places.sort_by(|a, b| locale_cmp(&a.title, &b.title));
    places
}

/// Visits sorted by date, most recent first.
pub fn build_visits(records: &[Record]) -> Result<Vec<&Visit>, InvalidDateError> {
    let mut dated = dated_visits(records)?;
    sort_newest_first(&mut dated);
    Ok(dated.into_iter().map(|d| d.visit).collect())
}

/// Visits grouped by the calendar year of their date.
pub fn build_visits_by_year(records: &[Record]) -> Result<VisitsByYear<'_>, InvalidDateError> {
    let dated = dated_visits(records)?;
    Ok(group_newest_first(dated, |d| d.at.year()))
}

/// Visits grouped by their `place` field, verbatim.
pub fn build_visits_by_place(records: &[Record]) -> Result<VisitsByPlace<'_>, InvalidDateError> {
    let dated = dated_visits(records)?;
    Ok(group_newest_first(dated, |d| d.visit.place.clone()))
}

struct Dated<'a> {
    at: NaiveDateTime,
    visit: &'a Visit,
}

fn dated_visits(records: &[Record]) -> Result<Vec<Dated<'_>>, InvalidDateError> {
    records
        .iter()
        .filter_map(Record::as_visit)
        .map(|visit| -> Result<Dated<'_>, InvalidDateError> {
            Ok(Dated {
                at: visit.date()?,
                visit,
            })
        })
        .collect()
}

fn sort_newest_first(dated: &mut [Dated<'_>]) {
    dated.sort_by(|a, b| b.at.cmp(&a.at));
}

fn group_newest_first<'a, K: Ord>(
    dated: Vec<Dated<'a>>,
    key: impl Fn(&Dated<'a>) -> K,
) -> BTreeMap<K, Vec<&'a Visit>> {
    let mut groups: BTreeMap<K, Vec<Dated<'a>>> = BTreeMap::new();
    for d in dated {
        groups.entry(key(&d)).or_default().push(d);
    }
    groups
        .into_iter()
        .map(|(k, mut group)| {
            sort_newest_first(&mut group);
            (k, group.into_iter().map(|d| d.visit).collect())
        })
        .collect()
}
