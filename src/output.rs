//! CLI output formatting for every subcommand.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Places
//!     4 places, 4 visited
//! Visits
//!     2024: 4 visits
//!     2023: 2 visits
//!
//! Wrote src/_data/site-data.json
//! Wrote src/_data/years.json
//! Built 4 places, 6 visits across 2 years
//! ```
//!
//! ## Check
//!
//! ```text
//! 2 warnings
//!     2024-01-05-x: unknown place "x"
//!     slug "prater" is used by 2 places
//! ```
//!
//! ## Compress
//!
//! ```text
//! Compressing 2 image(s) at 45% quality
//!
//! Compression complete
//!     Processed: 2 file(s)
//!     Original size: 1.46 MB
//!     Compressed size: 612.3 KB
//!     Saved: 884.7 KB (59.1%)
//!
//! Detailed breakdown
//!     hero.jpg
//!         1.2 MB → 400.5 KB (67.4% saved)
//!     icons/logo.png
//!         268.3 KB → 211.8 KB (21.1% saved)
//! ```
//!
//! # Architecture
//!
//! Each subcommand has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::compress::{CompressionReport, Mode};
use crate::site::{BuildSummary, Finding};
use std::path::Path;

const INDENT: &str = "    ";

/// Human-readable byte count: `0 B`, `512 B`, `1.5 KB`, `2.25 MB`.
///
/// Powers of 1024, at most two decimals, trailing zeros dropped. Sizes past
/// the megabyte range stay in MB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 3] = ["B", "KB", "MB"];
    let mut exp = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exp < UNITS.len() - 1 {
        scaled /= 1024;
        exp += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exp])
}

fn percent(part: i64, whole: u64) -> String {
    if whole == 0 {
        return "0".to_string();
    }
    format!("{:.1}", part as f64 / whole as f64 * 100.0)
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary, project_root: &Path) -> Vec<String> {
    let mut lines = vec![
        "Places".to_string(),
        format!(
            "{INDENT}{} places, {} visited",
            summary.places, summary.visited_places
        ),
        "Visits".to_string(),
    ];
    if summary.visits_per_year.is_empty() {
        lines.push(format!("{INDENT}none"));
    }
    for (year, count) in &summary.visits_per_year {
        let noun = if *count == 1 { "visit" } else { "visits" };
        lines.push(format!("{INDENT}{year}: {count} {noun}"));
    }
    lines.push(String::new());
    for path in &summary.written {
        lines.push(format!("Wrote {}", display_path(path, project_root)));
    }
    lines.push(format!(
        "Built {} places, {} visits across {} years",
        summary.places,
        summary.visits,
        summary.years.len()
    ));
    lines
}

pub fn print_build_output(summary: &BuildSummary, project_root: &Path) {
    for line in format_build_output(summary, project_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(findings: &[Finding]) -> Vec<String> {
    if findings.is_empty() {
        return vec!["No problems found".to_string()];
    }
    let noun = if findings.len() == 1 {
        "warning"
    } else {
        "warnings"
    };
    let mut lines = vec![format!("{} {}", findings.len(), noun)];
    lines.extend(findings.iter().map(|f| format!("{INDENT}{f}")));
    lines
}

pub fn print_check_output(findings: &[Finding]) {
    for line in format_check_output(findings) {
        println!("{}", line);
    }
}

// ============================================================================
// Compress
// ============================================================================

/// Header printed before a batch starts. Empty when there is nothing to do.
pub fn format_compress_start(count: usize, quality: u32, mode: Mode) -> Vec<String> {
    match (count, mode) {
        (0, Mode::All) => vec!["No image files found in assets/".to_string()],
        (0, Mode::Staged) => Vec::new(),
        _ => vec![
            format!("Compressing {count} image(s) at {quality}% quality"),
            String::new(),
        ],
    }
}

pub fn format_compress_report(report: &CompressionReport, mode: Mode) -> Vec<String> {
    if report.processed() == 0 {
        let mut lines = Vec::new();
        if mode == Mode::All {
            lines.push("No images were compressed".to_string());
        }
        if report.failed > 0 {
            lines.push(format!("{} file(s) failed to compress", report.failed));
        }
        return lines;
    }

    let total_original = report.total_original();
    let mut lines = vec![
        "Compression complete".to_string(),
        format!("{INDENT}Processed: {} file(s)", report.processed()),
        format!("{INDENT}Original size: {}", format_bytes(total_original)),
        format!(
            "{INDENT}Compressed size: {}",
            format_bytes(report.total_compressed())
        ),
    ];
    let saved = report.total_saved();
    if saved > 0 {
        lines.push(format!(
            "{INDENT}Saved: {} ({}%)",
            format_bytes(saved as u64),
            percent(saved, total_original)
        ));
    }

    lines.push(String::new());
    lines.push("Detailed breakdown".to_string());
    for file in &report.files {
        lines.push(format!("{INDENT}{}", file.path.display()));
        lines.push(format!(
            "{INDENT}{INDENT}{} → {} ({}% saved)",
            format_bytes(file.original),
            format_bytes(file.compressed),
            percent(file.saved(), file.original)
        ));
    }

    if report.failed > 0 {
        lines.push(String::new());
        lines.push(format!("{} file(s) failed to compress", report.failed));
    }
    lines
}

pub fn print_compress_start(count: usize, quality: u32, mode: Mode) {
    for line in format_compress_start(count, quality, mode) {
        println!("{}", line);
    }
}

pub fn print_compress_report(report: &CompressionReport, mode: Mode) {
    for line in format_compress_report(report, mode) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::FileResult;
    use crate::imaging::CompressOutcome;
    use std::path::PathBuf;

    // =========================================================================
    // format_bytes
    // =========================================================================

    #[test]
    fn bytes_zero() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn bytes_small() {
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn bytes_kilobytes_drop_trailing_zeros() {
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1100), "1.07 KB");
    }

    #[test]
    fn bytes_megabytes() {
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(2_359_296), "2.25 MB");
    }

    #[test]
    fn bytes_past_megabytes_stay_in_mb() {
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3072 MB");
    }

    // =========================================================================
    // Build / check
    // =========================================================================

    #[test]
    fn build_output_lists_years_and_files() {
        let root = Path::new("/site");
        let summary = BuildSummary {
            places: 4,
            visits: 6,
            visits_per_year: vec![(2024, 5), (2023, 1)],
            visited_places: 3,
            years: vec!["2024".into(), "2023".into()],
            written: vec![PathBuf::from("/site/src/_data/site-data.json")],
        };

        let lines = format_build_output(&summary, root);

        assert_eq!(
            lines,
            vec![
                "Places",
                "    4 places, 3 visited",
                "Visits",
                "    2024: 5 visits",
                "    2023: 1 visit",
                "",
                "Wrote src/_data/site-data.json",
                "Built 4 places, 6 visits across 2 years",
            ]
        );
    }

    #[test]
    fn build_output_without_visits() {
        let summary = BuildSummary {
            places: 0,
            visits: 0,
            visits_per_year: vec![],
            visited_places: 0,
            years: vec![],
            written: vec![],
        };
        let lines = format_build_output(&summary, Path::new("/"));
        assert_eq!(lines[3], "    none");
    }

    #[test]
    fn check_output() {
        assert_eq!(format_check_output(&[]), vec!["No problems found"]);

        let lines = format_check_output(&[Finding::DuplicateSlug {
            slug: "prater".into(),
            count: 2,
        }]);
        assert_eq!(
            lines,
            vec!["1 warning", "    slug \"prater\" is used by 2 places"]
        );
    }

    // =========================================================================
    // Compress
    // =========================================================================

    fn file(path: &str, original: u64, compressed: u64) -> FileResult {
        FileResult {
            path: PathBuf::from(path),
            original,
            compressed,
            outcome: CompressOutcome::Rewritten,
        }
    }

    #[test]
    fn compress_start_messages() {
        assert_eq!(
            format_compress_start(0, 45, Mode::All),
            vec!["No image files found in assets/"]
        );
        assert!(format_compress_start(0, 45, Mode::Staged).is_empty());
        assert_eq!(
            format_compress_start(3, 45, Mode::Staged)[0],
            "Compressing 3 image(s) at 45% quality"
        );
    }

    #[test]
    fn compress_report_full() {
        let report = CompressionReport {
            files: vec![file("a.jpg", 2048, 1024), file("b.png", 1024, 1024)],
            failed: 1,
        };

        let lines = format_compress_report(&report, Mode::All);

        assert_eq!(
            lines,
            vec![
                "Compression complete",
                "    Processed: 2 file(s)",
                "    Original size: 3 KB",
                "    Compressed size: 2 KB",
                "    Saved: 1 KB (33.3%)",
                "",
                "Detailed breakdown",
                "    a.jpg",
                "        2 KB → 1 KB (50.0% saved)",
                "    b.png",
                "        1 KB → 1 KB (0.0% saved)",
                "",
                "1 file(s) failed to compress",
            ]
        );
    }

    #[test]
    fn compress_report_no_savings_omits_saved_line() {
        let report = CompressionReport {
            files: vec![file("a.webp", 500, 500)],
            failed: 0,
        };
        let lines = format_compress_report(&report, Mode::All);
        assert!(!lines.iter().any(|l| l.contains("Saved:")));
    }

    #[test]
    fn compress_report_empty_file_percent() {
        let report = CompressionReport {
            files: vec![file("empty.png", 0, 0)],
            failed: 0,
        };
        let lines = format_compress_report(&report, Mode::All);
        assert!(lines.contains(&"        0 B → 0 B (0% saved)".to_string()));
    }

    #[test]
    fn compress_report_nothing_processed() {
        let report = CompressionReport::default();
        assert_eq!(
            format_compress_report(&report, Mode::All),
            vec!["No images were compressed"]
        );
        assert!(format_compress_report(&report, Mode::Staged).is_empty());
    }
}
