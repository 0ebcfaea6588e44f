//! Parameter types for compression operations.
//!
//! These describe *what* to do with a file, not *how*: the batch driver in
//! [`compress`](crate::compress) builds them, the
//! [`backend`](super::backend) does the pixel work.

use std::path::{Path, PathBuf};

/// Quality setting for lossy encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(45)
    }
}

/// How a file gets re-encoded, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Lossy re-encode at the configured quality.
    Jpeg,
    /// Lossless re-encode with maximum deflate effort.
    Png,
    /// Recognised as an image but left untouched (WebP, anything else).
    Passthrough,
}

impl Codec {
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Codec::Jpeg,
            "png" => Codec::Png,
            _ => Codec::Passthrough,
        }
    }
}

/// Compress one file in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressParams {
    pub path: PathBuf,
    pub codec: Codec,
    pub quality: Quality,
}

impl CompressParams {
    pub fn new(path: &Path, quality: Quality) -> Self {
        Self {
            path: path.to_path_buf(),
            codec: Codec::for_path(path),
            quality,
        }
    }
}
