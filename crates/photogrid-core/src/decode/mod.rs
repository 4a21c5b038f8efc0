//! Image source handling for Photogrid.
//!
//! This module provides functionality for:
//! - Sniffing whether a byte source is an image media type at all
//! - Probing natural dimensions and EXIF orientation from the header alone
//! - Full pixel decoding with orientation correction at export time
//!
//! # Architecture
//!
//! Slot assignment probes the header only, so assigning an image is cheap
//! and a non-image source can be rejected without touching pixel data. The
//! full decode runs once per slot during export; a source that probed fine
//! but fails to decode (truncated data) surfaces there and aborts the
//! export.

mod full;
mod probe;
mod types;

pub use full::decode_image;
pub use probe::probe_source;
pub use types::{DecodeError, DecodedImage, Orientation, SourceInfo};
