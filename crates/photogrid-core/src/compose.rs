//! Compositor: renders a layout and its slots into an RGB raster.
//!
//! The output canvas is sized from the aspect ratio and a base (longer-side)
//! size. Gap and corner-radius settings are specified at the on-screen
//! reference canvas size and scaled to the output, so spacing and rounding
//! look the same at every export resolution. Each block draws either its
//! slot's cover crop (bilinear-resampled into the destination rectangle) or
//! a placeholder fill, clipped to rounded corners when a radius is set.
//!
//! Slots decode sequentially in block order; the first decode failure aborts
//! the whole composition so a partial canvas never escapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::layout::{AspectRatio, BlockRect, Layout, REFERENCE_CANVAS_SIZE};
use crate::slot::SlotStore;
use crate::transform::source_crop;

/// Fill color for blocks without an assigned image.
pub const PLACEHOLDER_COLOR: Rgb = Rgb::new(0x1a, 0x1a, 0x2e);

/// An RGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string: `#RRGGBB` or `#RGB`, leading `#` optional.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let r = expand_nibble(hex.as_bytes()[0])?;
                let g = expand_nibble(hex.as_bytes()[1])?;
                let b = expand_nibble(hex.as_bytes()[2])?;
                Some(Rgb::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Rgb::new(r, g, b))
            }
            _ => None,
        }
    }
}

/// Expand a single hex nibble: 'f' -> 0xFF, 'a' -> 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = match ch {
        b'0'..=b'9' => ch - b'0',
        b'a'..=b'f' => ch - b'a' + 10,
        b'A'..=b'F' => ch - b'A' + 10,
        _ => return None,
    };
    Some(n << 4 | n)
}

/// Settings for one composition pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComposeSettings {
    /// Canvas proportions.
    pub aspect_ratio: AspectRatio,
    /// Output size of the longer side, in pixels.
    pub base_size: u32,
    /// Gap between blocks, in reference-canvas pixels.
    pub gap: u32,
    /// Corner radius, in reference-canvas pixels.
    pub border_radius: u32,
    /// Canvas background color.
    pub background: Rgb,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::new(1, 1),
            base_size: 1080,
            gap: 0,
            border_radius: 0,
            background: Rgb::BLACK,
        }
    }
}

/// Errors that can occur during composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The requested output size collapses to a zero-area canvas.
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    /// A slot's source failed to decode. Aborts the whole composition.
    #[error("Failed to decode image in slot {slot}: {source}")]
    Decode {
        slot: usize,
        #[source]
        source: DecodeError,
    },
}

/// Integer destination rectangle for a block, possibly overhanging the
/// canvas by a pixel due to rounding; drawing clamps to canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DestRect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

/// Compose the layout into an RGB raster at the configured output size.
///
/// # Arguments
///
/// * `layout` - Block arrangement; block order defines slot binding
/// * `slots` - Assigned images and their pan/zoom state
/// * `settings` - Canvas, spacing, and color configuration
///
/// # Returns
///
/// The composed canvas. Filled slots are decoded on the fly; the first
/// failure aborts with `ComposeError::Decode` and nothing partial is
/// returned.
pub fn compose(
    layout: &Layout,
    slots: &SlotStore,
    settings: &ComposeSettings,
) -> Result<DecodedImage, ComposeError> {
    let (canvas_w, canvas_h) = settings.aspect_ratio.canvas_size(settings.base_size);
    if canvas_w == 0 || canvas_h == 0 {
        return Err(ComposeError::InvalidCanvas {
            width: canvas_w,
            height: canvas_h,
        });
    }

    let mut canvas = Canvas {
        width: canvas_w,
        height: canvas_h,
        pixels: [settings.background.r, settings.background.g, settings.background.b]
            .repeat((canvas_w as usize) * (canvas_h as usize)),
    };

    // Gap and radius scale with the output size relative to the on-screen
    // reference canvas.
    let ref_scale = settings.base_size as f64 / REFERENCE_CANVAS_SIZE as f64;
    let gap_px = (settings.gap as f64 * ref_scale).round();
    let radius_px = (settings.border_radius as f64 * ref_scale).round();

    for (i, block) in layout.blocks.iter().enumerate() {
        let dest = block_dest_rect(block, canvas_w, canvas_h, gap_px);
        if dest.w <= 0 || dest.h <= 0 {
            // Gap swallowed the whole block at this resolution
            continue;
        }

        match slots.get(i) {
            Some(slot) => {
                let image = decode_image(slot.source())
                    .map_err(|e| ComposeError::Decode { slot: i, source: e })?;
                draw_cover(&mut canvas, &image, dest, radius_px, &slot.view);
            }
            None => fill_rect(&mut canvas, dest, radius_px, PLACEHOLDER_COLOR),
        }
    }

    Ok(DecodedImage::new(canvas.width, canvas.height, canvas.pixels))
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    #[inline]
    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        self.pixels[idx] = color[0];
        self.pixels[idx + 1] = color[1];
        self.pixels[idx + 2] = color[2];
    }
}

/// Destination rectangle for a block: the fraction rectangle scaled to the
/// canvas, inset by half the gap on each side.
fn block_dest_rect(block: &BlockRect, canvas_w: u32, canvas_h: u32, gap_px: f64) -> DestRect {
    let cw = canvas_w as f64;
    let ch = canvas_h as f64;
    DestRect {
        x: (block.x * cw + gap_px / 2.0).round() as i64,
        y: (block.y * ch + gap_px / 2.0).round() as i64,
        w: (block.w * cw - gap_px).round() as i64,
        h: (block.h * ch - gap_px).round() as i64,
    }
}

/// Whether a point lies inside the rounded rectangle.
///
/// The radius is capped at half the shorter side so adjacent corner arcs
/// never cross.
fn inside_rounded_rect(px: f64, py: f64, rect: DestRect, radius: f64) -> bool {
    let (x, y) = (rect.x as f64, rect.y as f64);
    let (w, h) = (rect.w as f64, rect.h as f64);
    if px < x || py < y || px > x + w || py > y + h {
        return false;
    }
    let r = radius.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return true;
    }

    // Distance check only applies inside the corner squares
    let cx = if px < x + r {
        x + r
    } else if px > x + w - r {
        x + w - r
    } else {
        return true;
    };
    let cy = if py < y + r {
        y + r
    } else if py > y + h - r {
        y + h - r
    } else {
        return true;
    };

    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}

/// Iterate a destination rectangle's pixels clamped to the canvas, skipping
/// those outside the rounded-corner clip, and write the color produced by
/// `shade`.
fn fill_clipped<F: FnMut(i64, i64) -> [u8; 3]>(
    canvas: &mut Canvas,
    dest: DestRect,
    radius: f64,
    mut shade: F,
) {
    let x0 = dest.x.max(0);
    let y0 = dest.y.max(0);
    let x1 = (dest.x + dest.w).min(canvas.width as i64);
    let y1 = (dest.y + dest.h).min(canvas.height as i64);

    for py in y0..y1 {
        for px in x0..x1 {
            if radius > 0.0
                && !inside_rounded_rect(px as f64 + 0.5, py as f64 + 0.5, dest, radius)
            {
                continue;
            }
            let color = shade(px, py);
            canvas.put(px, py, color);
        }
    }
}

/// Fill a destination rectangle with a solid color (placeholder path).
fn fill_rect(canvas: &mut Canvas, dest: DestRect, radius: f64, color: Rgb) {
    fill_clipped(canvas, dest, radius, |_, _| [color.r, color.g, color.b]);
}

/// Draw a slot's cover crop stretched into the destination rectangle.
fn draw_cover(
    canvas: &mut Canvas,
    image: &DecodedImage,
    dest: DestRect,
    radius: f64,
    view: &crate::PanZoom,
) {
    let Some(crop) = source_crop(
        image.width,
        image.height,
        dest.w as f64,
        dest.h as f64,
        view,
    ) else {
        return;
    };

    let scale_x = crop.w / dest.w as f64;
    let scale_y = crop.h / dest.h as f64;

    fill_clipped(canvas, dest, radius, |px, py| {
        // Map the destination pixel center into the source crop
        let sx = crop.x + ((px - dest.x) as f64 + 0.5) * scale_x - 0.5;
        let sy = crop.y + ((py - dest.y) as f64 + 0.5) * scale_y - 0.5;
        sample_bilinear(image, sx, sy)
    });
}

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation, clamping to the image edges.
///
/// Edge clamping (rather than a black border) matters here: the cover crop
/// can touch the source boundary exactly, and the edge row must resample to
/// its own color.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================
