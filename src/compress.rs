//! Asset image compression.
//!
//! Selects image files under the assets directory (all of them, or only the
//! ones staged in git for a pre-commit hook), hands each one to an
//! [`ImageBackend`], and tallies the size change into a
//! [`CompressionReport`]. Per-file failures are logged and counted; they
//! never stop the batch.

use crate::config::CompressConfig;
use crate::imaging::{CompressOutcome, CompressParams, ImageBackend, Quality};
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Assets directory not found: {0}")]
    AssetsDirNotFound(PathBuf),
}

/// Which files a compression run picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    Staged,
}

/// Size change for one successfully processed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    /// Path relative to the assets directory.
    pub path: PathBuf,
    pub original: u64,
    pub compressed: u64,
    pub outcome: CompressOutcome,
}

impl FileResult {
    pub fn saved(&self) -> i64 {
        self.original as i64 - self.compressed as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionReport {
    pub files: Vec<FileResult>,
    pub failed: usize,
}

impl CompressionReport {
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    pub fn total_original(&self) -> u64 {
        self.files.iter().map(|f| f.original).sum()
    }

    pub fn total_compressed(&self) -> u64 {
        self.files.iter().map(|f| f.compressed).sum()
    }

    pub fn total_saved(&self) -> i64 {
        self.total_original() as i64 - self.total_compressed() as i64
    }
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(&ext)))
}

/// Every image file under `assets_dir`, recursively, in path order.
pub fn find_all_images(
    assets_dir: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, CompressError> {
    if !assets_dir.is_dir() {
        return Err(CompressError::AssetsDirNotFound(assets_dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(assets_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && has_image_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `assets_dir` in the form git prints: `/`-separated, no `.` or `..`
/// segments, no trailing slash.
fn repo_relative(dir: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(dir).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Pick image paths under `assets_dir` out of `git diff --name-only` output.
///
/// Git reports paths relative to the repository root with `/` separators;
/// the result is joined onto `project_root`.
pub fn filter_staged(
    git_output: &str,
    project_root: &Path,
    assets_dir: &str,
    extensions: &[String],
) -> Vec<PathBuf> {
    let prefix = format!("{}/", repo_relative(assets_dir));
    git_output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.starts_with(&prefix))
        .filter(|line| has_image_extension(Path::new(line), extensions))
        .map(|line| project_root.join(line))
        .collect()
}

/// Images staged for commit. Any git failure yields an empty list.
pub fn staged_images(project_root: &Path, config: &CompressConfig) -> Vec<PathBuf> {
    let output = Command::new("git")
        .args(["diff", "--cached", "--name-only", "--diff-filter=ACM"])
        .current_dir(project_root)
        .output();
    match output {
        Ok(out) if out.status.success() => filter_staged(
            &String::from_utf8_lossy(&out.stdout),
            project_root,
            &config.assets_dir,
            &config.extensions,
        ),
        Ok(out) => {
            tracing::debug!(status = %out.status, "git diff failed, no staged images");
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "could not run git, no staged images");
            Vec::new()
        }
    }
}

/// Resolve the file list for `mode`.
///
/// The assets directory must exist in both modes.
pub fn select_images(
    project_root: &Path,
    config: &CompressConfig,
    mode: Mode,
) -> Result<Vec<PathBuf>, CompressError> {
    let assets_dir = project_root.join(&config.assets_dir);
    if !assets_dir.is_dir() {
        return Err(CompressError::AssetsDirNotFound(assets_dir));
    }
    match mode {
        Mode::All => find_all_images(&assets_dir, &config.extensions),
        Mode::Staged => Ok(staged_images(project_root, config)),
    }
}

/// Compress `files` in order, recording sizes before and after.
pub fn compress_images(
    backend: &impl ImageBackend,
    files: &[PathBuf],
    assets_dir: &Path,
    quality: Quality,
) -> CompressionReport {
    let mut report = CompressionReport::default();

    for path in files {
        let original = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let result = backend
            .compress(&CompressParams::new(path, quality))
            .map_err(|e| e.to_string())
            .and_then(|outcome| {
                std::fs::metadata(path)
                    .map(|m| (outcome, m.len()))
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok((outcome, compressed)) => {
                tracing::debug!(
                    path = %path.display(),
                    original,
                    compressed,
                    ?outcome,
                    "compressed"
                );
                report.files.push(FileResult {
                    path: path.strip_prefix(assets_dir).unwrap_or(path).to_path_buf(),
                    original,
                    compressed,
                    outcome,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to compress");
                report.failed += 1;
            }
        }
    }

    report
}
