//! # Twofold
//!
//! Data layer for a static travel log: places, dated visits to those places,
//! and the collections and template filters a static site renders from them.
//! Content lives in markdown files with YAML front-matter; this crate turns
//! it into sorted, grouped, JSON-serializable data and ships the small
//! helpers templates call while rendering.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load     src/places, src/visits  →  ContentStore     (front-matter → records)
//! 2. Build    ContentStore            →  Collections      (sorted + grouped views)
//! 3. Export   Collections + years     →  _data/*.json     (input for the renderer)
//! ```
//!
//! Builders take the record source as a parameter and borrow from it; nothing
//! is global and nothing is cached between builds.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Place`, `Visit`, `Ratings`, `Record` |
//! | [`content`] | Front-matter loader and the `RecordSource` trait |
//! | [`collections`] | `places`, `visits`, `visitsByYear`, `visitsByPlace` builders |
//! | [`filters`] | Template filters: dates, ratings, stars, cities, markdown |
//! | [`years`] | Year index from visit filenames |
//! | [`site`] | Loads a project, writes `site-data.json`, runs content checks |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`dates`] | Visit date parsing |
//! | [`collate`] | Locale-aware string ordering for place titles |
//! | [`naming`] | `YYYY-MM-DD-slug` filename convention |
//! | [`compress`] | Asset image compression driver (all or git-staged) |
//! | [`imaging`] | Pure-Rust JPEG/PNG re-encoding backend |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fail Fast on Dates
//!
//! A visit date that does not parse stops the build with
//! [`dates::InvalidDateError`]. Silently sorting such a visit to the epoch
//! would publish it on the wrong year page.
//!
//! ## Borrowed Collections
//!
//! Collections hold `&Visit` / `&Place` into the loaded store. The same
//! record appears in `visits`, one `visitsByYear` group and one
//! `visitsByPlace` group without being cloned.
//!
//! ## Pure-Rust Imaging
//!
//! Compression uses the `image` crate's own JPEG and PNG encoders: no
//! `imagemin`, no system libraries, one self-contained binary.

pub mod collate;
pub mod collections;
pub mod compress;
pub mod config;
pub mod content;
pub mod dates;
pub mod filters;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod site;
pub mod types;
pub mod years;

#[cfg(test)]
pub(crate) mod test_helpers;
