//! Header-level probing of image sources.
//!
//! Slot assignment only needs the media type and natural dimensions, not the
//! pixels. Probing reads the container header and the EXIF orientation tag,
//! deferring the full decode to export time.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, Orientation, SourceInfo};

/// Probe an image source without decoding its pixels.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes
///
/// # Returns
///
/// A `SourceInfo` with the natural dimensions and EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image media type, or `DecodeError::CorruptedFile` if the header cannot
/// be read.
pub fn probe_source(bytes: &[u8]) -> Result<SourceInfo, DecodeError> {
    // Media-type sniff: unrecognized magic bytes are not an image at all.
    image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(DecodeError::CorruptedFile(
            "zero-sized image".to_string(),
        ));
    }

    Ok(SourceInfo {
        width,
        height,
        orientation: extract_orientation(bytes),
    })
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub(super) fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}
