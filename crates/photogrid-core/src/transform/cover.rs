//! Cover-fit geometry.
//!
//! The base cover size is found by comparing the image ratio against the box
//! ratio: the shorter image dimension exactly fills the matching box
//! dimension, cropping the longer one. Pan offsets are fractions of the
//! maximum pan range at the current scale, so the same state maps cleanly to
//! both display and source space without drift across resizes.

use crate::PanZoom;

/// Placement of the covering rectangle in display space, relative to the
/// block's top-left corner. `x`/`y` are typically negative or zero since the
/// rectangle overhangs the block.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Source-pixel crop rectangle to sample for rendering.
///
/// Always lies within `[0, natural_w] x [0, natural_h]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SourceCrop {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Base cover size for an image of ratio `img_ratio` in a `box_w` x `box_h`
/// box: the smallest rectangle of the image's ratio that fully covers the
/// box.
fn base_cover(img_ratio: f64, box_w: f64, box_h: f64) -> (f64, f64) {
    let box_ratio = box_w / box_h;
    if img_ratio > box_ratio {
        // Box is relatively taller: height fills, width overhangs.
        (box_h * img_ratio, box_h)
    } else {
        (box_w, box_w / img_ratio)
    }
}

/// Maximum pan distance in display pixels at the given scale.
///
/// Returns `None` for a degenerate box or image. The components are zero
/// when the scaled cover exactly fits the box on that axis (no pan
/// possible); floating-point noise is clamped out.
pub fn max_pan(
    natural_w: u32,
    natural_h: u32,
    box_w: f64,
    box_h: f64,
    scale: f64,
) -> Option<(f64, f64)> {
    if box_w <= 0.0 || box_h <= 0.0 || natural_w == 0 || natural_h == 0 {
        return None;
    }
    let img_ratio = natural_w as f64 / natural_h as f64;
    let (base_w, base_h) = base_cover(img_ratio, box_w, box_h);
    let w = base_w * scale;
    let h = base_h * scale;
    Some((
        ((w - box_w) / 2.0).max(0.0),
        ((h - box_h) / 2.0).max(0.0),
    ))
}

/// Compute the display-space placement of the covering rectangle.
///
/// The base cover size is scaled by `view.scale`, centered on the box, then
/// translated by `offset * max_pan` on each axis.
///
/// # Arguments
///
/// * `natural_w`, `natural_h` - Source image dimensions in pixels
/// * `box_w`, `box_h` - Block dimensions in display pixels
/// * `view` - Pan/zoom state
///
/// # Returns
///
/// The covering rectangle relative to the block's top-left corner, or `None`
/// if the box or image is degenerate (zero-area).
pub fn display_rect(
    natural_w: u32,
    natural_h: u32,
    box_w: f64,
    box_h: f64,
    view: &PanZoom,
) -> Option<DisplayRect> {
    if box_w <= 0.0 || box_h <= 0.0 || natural_w == 0 || natural_h == 0 {
        return None;
    }
    let img_ratio = natural_w as f64 / natural_h as f64;
    let (base_w, base_h) = base_cover(img_ratio, box_w, box_h);

    let w = base_w * view.scale;
    let h = base_h * view.scale;

    let max_pan_x = ((w - box_w) / 2.0).max(0.0);
    let max_pan_y = ((h - box_h) / 2.0).max(0.0);

    Some(DisplayRect {
        x: (box_w - w) / 2.0 + view.offset_x * max_pan_x,
        y: (box_h - h) / 2.0 + view.offset_y * max_pan_y,
        w,
        h,
    })
}

/// Compute the source-space crop rectangle for rendering.
///
/// This is the dual of [`display_rect`]: the base crop is the natural-pixel
/// region that exactly covers the box at scale 1, and zooming in samples a
/// region smaller by `1 / scale` per axis. Increasing an offset pans the
/// visible window one way on screen, which shifts the sampled source origin
/// the opposite way; hence the sign flip relative to display space. The
/// origin is clamped into `[0, natural - sampled]` to absorb floating-point
/// drift at extreme scale/offset combinations.
///
/// # Arguments
///
/// * `natural_w`, `natural_h` - Source image dimensions in pixels
/// * `box_w`, `box_h` - Destination rectangle dimensions in output pixels
/// * `view` - Pan/zoom state
///
/// # Returns
///
/// The crop rectangle in source pixels, or `None` if the box or image is
/// degenerate (zero-area).
pub fn source_crop(
    natural_w: u32,
    natural_h: u32,
    box_w: f64,
    box_h: f64,
    view: &PanZoom,
) -> Option<SourceCrop> {
    if box_w <= 0.0 || box_h <= 0.0 || natural_w == 0 || natural_h == 0 {
        return None;
    }
    let nw = natural_w as f64;
    let nh = natural_h as f64;
    let img_ratio = nw / nh;
    let box_ratio = box_w / box_h;

    // Base source crop: the natural-pixel region covering the box at scale 1.
    let (base_sw, base_sh) = if img_ratio > box_ratio {
        (nh * box_ratio, nh)
    } else {
        (nw, nw / box_ratio)
    };

    let sw = base_sw / view.scale;
    let sh = base_sh / view.scale;

    let max_pan_x = nw - sw;
    let max_pan_y = nh - sh;

    let sx = max_pan_x / 2.0 - view.offset_x * (max_pan_x / 2.0);
    let sy = max_pan_y / 2.0 - view.offset_y * (max_pan_y / 2.0);

    Some(SourceCrop {
        x: sx.clamp(0.0, (nw - sw).max(0.0)),
        y: sy.clamp(0.0, (nh - sh).max(0.0)),
        w: sw,
        h: sh,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
