//! Image re-encoding for asset compression, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **JPEG** | `JpegEncoder::new_with_quality` |
//! | **PNG** | `PngEncoder::new_with_quality` (best, adaptive) |
//!
//! The module is split into:
//! - **Parameters**: what to do with a file ([`CompressParams`], [`Codec`], [`Quality`])
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, CompressOutcome, ImageBackend};
pub use params::{Codec, CompressParams, Quality};
pub use rust_backend::RustBackend;
