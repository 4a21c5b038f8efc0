//! Image encoding pipeline for Photogrid.
//!
//! The composed canvas is encoded to PNG, the single export format. PNG is
//! lossless, so the encoded file reproduces the composited raster exactly.

mod png;

pub use png::{encode_png, EncodeError};
