//! Year index: the years that have at least one visit, for navigation.
//!
//! Built from visit identifiers (`YYYY-MM-DD-slug` file stems), not from the
//! `date` front-matter, so it can be produced without parsing any record.
//! Identifiers whose first four characters are not digits are skipped.
//!
//! A misnamed file can make this index disagree with `visitsByYear`, which
//! groups by the parsed date. The two are not reconciled here;
//! `twofold check` reports such files.

use crate::content::RecordSource;
use crate::naming::year_prefix;
use std::collections::BTreeSet;

/// Distinct years, newest first, as four-digit strings.
pub fn build_year_index<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let years: BTreeSet<&str> = ids.into_iter().filter_map(year_prefix).collect();
    // Fixed width, so lexicographic order is numeric order
    years.into_iter().rev().map(str::to_string).collect()
}

/// Year index over every visit in a record source.
pub fn year_index<S: RecordSource + ?Sized>(source: &S) -> Vec<String> {
    build_year_index(source.visit_ids())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn years_from_identifiers_newest_first() {
        let ids = ["2023-05-01-foo", "2024-12-31-bar", "invalid-file"];
        assert_eq!(build_year_index(ids), vec!["2024", "2023"]);
    }

    #[test]
    fn duplicate_years_collapse() {
        let ids = ["2024-01-01-a", "2024-02-01-b", "2022-01-01-c", "2024-03-01-d"];
        assert_eq!(build_year_index(ids), vec!["2024", "2022"]);
    }

    #[test]
    fn empty_input_gives_empty_index() {
        assert!(build_year_index(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn year_index_serializes_as_string_list() {
        let json = serde_json::to_string(&build_year_index(["2021-01-01-a"])).unwrap();
        assert_eq!(json, r#"["2021"]"#);
    }

    #[test]
    fn index_uses_filename_not_date_field() {
        let mut v = visit("2024-01-05", "prater");
        v.id = "2019-01-05-prater".to_string();
        let store = ContentStore::from_records(visit_records(vec![v]));
        assert_eq!(year_index(&store), vec!["2019"]);
    }

    #[test]
    fn index_ignores_place_records() {
        let mut records = place_records(vec![place("2020-slug", "Odd", None)]);
        records.extend(visit_records(vec![visit("2024-01-05", "a")]));
        let store = ContentStore::from_records(records);
        assert_eq!(year_index(&store), vec!["2024"]);
    }

    #[test]
    fn fixture_year_index() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path()).unwrap();
        assert_eq!(year_index(&store), vec!["2024", "2023"]);
    }

    #[test]
    fn missing_visits_dir_gives_empty_index() {
        let tmp = TempDir::new().unwrap();
        let store = ContentStore::load(tmp.path()).unwrap();
        assert!(year_index(&store).is_empty());
    }
}
