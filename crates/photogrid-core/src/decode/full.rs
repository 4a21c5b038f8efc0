//! Full pixel decode with EXIF orientation handling.

use std::io::Cursor;

use image::DynamicImage;
use image::ImageReader;

use super::probe::extract_orientation;
use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// Any format the `image` crate recognizes is accepted. The returned
/// dimensions match what [`probe_source`](super::probe_source) reported as
/// the oriented dimensions for the same bytes.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes
///
/// # Returns
///
/// A `DecodedImage` with RGB pixel data and correct orientation applied.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image, or `DecodeError::CorruptedFile` if decoding fails partway.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);

    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        encode_png(&pixels, width, height).unwrap()
    }

    #[test]
    fn test_decode_valid_png() {
        let bytes = gradient_png(40, 30);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.width, 40);
        assert_eq!(img.height, 30);
        assert_eq!(img.pixels.len(), 40 * 30 * 3);
    }

    #[test]
    fn test_decode_round_trips_pixels() {
        let pixels = vec![
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ];
        let bytes = encode_png(&pixels, 2, 2).unwrap();
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.pixels, pixels);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = gradient_png(64, 64);
        // Keep the header (probe would still succeed) but drop the pixel data
        let result = decode_image(&bytes[..48]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dims() {
        let img = DynamicImage::new_rgb8(10, 20);
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!(rotated.width(), 20);
        assert_eq!(rotated.height(), 10);
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let img = DynamicImage::new_rgb8(10, 20);
        let out = apply_orientation(img, Orientation::Normal);
        assert_eq!(out.width(), 10);
        assert_eq!(out.height(), 20);
    }
}
