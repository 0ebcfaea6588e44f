//! Locale-aware string ordering for place titles.
//!
//! Approximates the root/English collation used by browsers:
//!
//! 1. **Primary**: base letters only, case-folded (`é` sorts with `e`).
//! 2. **Secondary**: accents (`e` before `é`).
//! 3. **Tertiary**: case, lowercase first (`a` before `A`).
//!
//! Strings equal on all three levels compare equal, so a stable sort keeps
//! their input order.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two strings the way a reader expects an index to be ordered.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}

fn primary_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Combining marks attached to each base character, in order.
fn secondary_key(s: &str) -> Vec<Vec<char>> {
    let mut key: Vec<Vec<char>> = Vec::new();
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(marks) = key.last_mut() {
                marks.push(c);
            }
        } else {
            key.push(Vec::new());
        }
    }
    key
}

/// `false` for lowercase, `true` for uppercase, per base character.
fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
