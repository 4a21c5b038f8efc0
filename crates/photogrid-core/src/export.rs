//! Export: compose the collage and encode it as a downloadable PNG.

use thiserror::Error;

use crate::compose::{compose, ComposeError, ComposeSettings};
use crate::encode::{encode_png, EncodeError};
use crate::layout::Layout;
use crate::slot::SlotStore;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Composition failed (decode failure or degenerate canvas).
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The composed canvas failed to encode.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// An encoded export artifact ready for download.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// Suggested download file name.
    pub name: String,
    /// PNG-encoded bytes.
    pub bytes: Vec<u8>,
}

/// Download file name for an export started at the given timestamp
/// (milliseconds since the Unix epoch).
pub fn export_file_name(timestamp_ms: u64) -> String {
    format!("combined-{timestamp_ms}.png")
}

/// Render the collage and encode it to PNG.
///
/// Slots decode sequentially in block order inside the composition; any
/// decode failure aborts the whole export and nothing partial is produced.
///
/// # Arguments
///
/// * `layout` - Block arrangement
/// * `slots` - Assigned images and pan/zoom state
/// * `settings` - Canvas, spacing, and color configuration
/// * `timestamp_ms` - Export start time (milliseconds since the Unix epoch),
///   used for the download file name
pub fn export_png(
    layout: &Layout,
    slots: &SlotStore,
    settings: &ComposeSettings,
    timestamp_ms: u64,
) -> Result<ExportedFile, ExportError> {
    let canvas = compose(layout, slots, settings)?;
    let bytes = encode_png(&canvas.pixels, canvas.width, canvas.height)?;
    Ok(ExportedFile {
        name: export_file_name(timestamp_ms),
        bytes,
    })
}
