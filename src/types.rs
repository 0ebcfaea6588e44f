//! Record types shared by the content store, the collection builders and the
//! filters.
//!
//! These are decoded from front-matter by [`content`](crate::content) and
//! serialized unchanged into `site-data.json`, so field names follow the
//! front-matter keys authors write.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Front-matter keys that are not part of the typed schema.
///
/// Kept so the rendering layer still sees everything the author wrote.
pub type Extra = BTreeMap<String, serde_yaml::Value>;

/// A physical location that can be visited (`places/<slug>.md`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name; primary sort key for place listings.
    pub title: String,
    /// Unique identifier used by visits and URLs. Defaults to the file stem.
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(flatten)]
    pub extra: Extra,
    /// Markdown body after the front-matter.
    #[serde(skip_deserializing, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// `body` rendered to HTML.
    #[serde(
        rename = "content",
        skip_deserializing,
        skip_serializing_if = "String::is_empty"
    )]
    pub html: String,
}

impl Place {
    /// City of this place, if the author recorded one.
    pub fn city(&self) -> Option<&str> {
        self.location.as_ref()?.city.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One dated visit to a place (`visits/YYYY-MM-DD-<slug>.md`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// File stem, e.g. `2024-01-05-cafe-central`.
    #[serde(skip_deserializing)]
    pub id: String,
    /// Raw date as written in front-matter; parsed by [`Visit::date`].
    /// Empty when the key is missing, which the builders reject.
    #[serde(rename = "date", default, deserialize_with = "lenient_date")]
    pub raw_date: String,
    /// Slug of the visited place. Not checked against the place set.
    pub place: String,
    /// `None` unless front-matter holds a map or a list.
    #[serde(
        default,
        deserialize_with = "lenient_ratings",
        skip_serializing_if = "Option::is_none"
    )]
    pub ratings: Option<Ratings>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip_deserializing, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(
        rename = "content",
        skip_deserializing,
        skip_serializing_if = "String::is_empty"
    )]
    pub html: String,
}

impl Visit {
    /// Parse this visit's date.
    pub fn date(&self) -> Result<chrono::NaiveDateTime, crate::dates::InvalidDateError> {
        crate::dates::parse_date(&self.raw_date)
    }
}

/// Per-category scores, e.g. `coffee: 4.5`, `vibe: "n/a"`.
pub type Ratings = BTreeMap<String, RatingValue>;

/// A single rating entry. Anything that is not a number is kept verbatim and
/// ignored by aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingValue {
    Score(f64),
    Other(serde_yaml::Value),
}

impl RatingValue {
    pub fn score(&self) -> Option<f64> {
        match self {
            RatingValue::Score(v) => Some(*v),
            RatingValue::Other(_) => None,
        }
    }
}

impl From<Value> for RatingValue {
    fn from(value: Value) -> Self {
        match value.as_f64() {
            Some(score) => RatingValue::Score(score),
            None => RatingValue::Other(value),
        }
    }
}

/// Ratings from any front-matter shape.
///
/// A map keeps its keys, a list is keyed by position, and any other value
/// (`n/a`, a bare number, null) means no ratings.
pub fn ratings_from_value(value: Value) -> Option<Ratings> {
    match value {
        Value::Mapping(map) => Some(
            map.into_iter()
                .filter_map(|(k, v)| Some((scalar_string(&k)?, RatingValue::from(v))))
                .collect(),
        ),
        Value::Sequence(items) => Some(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), RatingValue::from(v)))
                .collect(),
        ),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_ratings<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Ratings>, D::Error> {
    Ok(ratings_from_value(Value::deserialize(d)?))
}

fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_string(&Value::deserialize(d)?).unwrap_or_default())
}

/// A record loaded from the content store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Place(Place),
    Visit(Visit),
}

impl Record {
    pub fn as_place(&self) -> Option<&Place> {
        match self {
            Record::Place(p) => Some(p),
            Record::Visit(_) => None,
        }
    }

    pub fn as_visit(&self) -> Option<&Visit> {
        match self {
            Record::Visit(v) => Some(v),
            Record::Place(_) => None,
        }
    }
}
