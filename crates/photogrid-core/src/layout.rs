//! Static layout catalog for grid collages.
//!
//! Layouts position their blocks within a 1x1 normalized space. Each block
//! is a fraction-based rectangle; block order defines which slot index each
//! rectangle binds to. The catalog is keyed by image count (2 to 6), with
//! one or more layout variants per count.

use serde::{Deserialize, Serialize};

/// Canvas proportions. The ratio is `width / height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-over-height ratio.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Output canvas dimensions for a given base size.
    ///
    /// The longer side (by ratio) equals `base`; the shorter side is scaled
    /// by the ratio and rounded to the nearest integer pixel.
    pub fn canvas_size(&self, base: u32) -> (u32, u32) {
        let w = if self.width >= self.height {
            base
        } else {
            (base as f64 * self.width as f64 / self.height as f64).round() as u32
        };
        let h = if self.height >= self.width {
            base
        } else {
            (base as f64 * self.height as f64 / self.width as f64).round() as u32
        };
        (w, h)
    }

    /// Display label, e.g. "16:9".
    pub fn label(&self) -> String {
        format!("{}:{}", self.width, self.height)
    }
}

/// A block rectangle in normalized coordinates.
///
/// All fields are fractions of the canvas in [0, 1]; (0, 0) is the top-left
/// corner. For every shipped layout, `x + w <= 1` and `y + h <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

const fn block(x: f64, y: f64, w: f64, h: f64) -> BlockRect {
    BlockRect { x, y, w, h }
}

/// A named arrangement of blocks. Immutable; selected from the catalog by
/// `(image_count, layout_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub name: &'static str,
    pub blocks: &'static [BlockRect],
}

/// Supported image counts.
pub const IMAGE_COUNTS: [u32; 5] = [2, 3, 4, 5, 6];

/// Fixed aspect ratio catalog.
pub const ASPECT_RATIOS: [AspectRatio; 5] = [
    AspectRatio::new(1, 1),
    AspectRatio::new(4, 3),
    AspectRatio::new(16, 9),
    AspectRatio::new(9, 16),
    AspectRatio::new(3, 4),
];

/// Export base sizes (longer side, in pixels).
pub const EXPORT_SIZES: [u32; 4] = [1080, 1440, 2160, 4320];

/// Gap steps in reference-canvas pixels.
pub const GAP_OPTIONS: [u32; 4] = [0, 8, 16, 24];

/// Maximum corner radius in reference-canvas pixels.
pub const MAX_BORDER_RADIUS: u32 = 32;

/// On-screen canvas size that gap and corner-radius settings are specified
/// against. Export scales both by `base_size / REFERENCE_CANVAS_SIZE`.
pub const REFERENCE_CANVAS_SIZE: u32 = 600;

const THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

const TWO_UP: [Layout; 2] = [
    Layout {
        name: "Side by side",
        blocks: &[block(0.0, 0.0, 0.5, 1.0), block(0.5, 0.0, 0.5, 1.0)],
    },
    Layout {
        name: "Top and bottom",
        blocks: &[block(0.0, 0.0, 1.0, 0.5), block(0.0, 0.5, 1.0, 0.5)],
    },
];

const THREE_UP: [Layout; 3] = [
    Layout {
        name: "1 left + 2 right",
        blocks: &[
            block(0.0, 0.0, 0.5, 1.0),
            block(0.5, 0.0, 0.5, 0.5),
            block(0.5, 0.5, 0.5, 0.5),
        ],
    },
    Layout {
        name: "1 top + 2 bottom",
        blocks: &[
            block(0.0, 0.0, 1.0, 0.5),
            block(0.0, 0.5, 0.5, 0.5),
            block(0.5, 0.5, 0.5, 0.5),
        ],
    },
    Layout {
        name: "3 columns",
        blocks: &[
            block(0.0, 0.0, THIRD, 1.0),
            block(THIRD, 0.0, THIRD, 1.0),
            block(TWO_THIRDS, 0.0, THIRD, 1.0),
        ],
    },
];

const FOUR_UP: [Layout; 3] = [
    Layout {
        name: "2x2 Grid",
        blocks: &[
            block(0.0, 0.0, 0.5, 0.5),
            block(0.5, 0.0, 0.5, 0.5),
            block(0.0, 0.5, 0.5, 0.5),
            block(0.5, 0.5, 0.5, 0.5),
        ],
    },
    Layout {
        name: "1 left + 3 right",
        blocks: &[
            block(0.0, 0.0, 0.5, 1.0),
            block(0.5, 0.0, 0.5, THIRD),
            block(0.5, THIRD, 0.5, THIRD),
            block(0.5, TWO_THIRDS, 0.5, THIRD),
        ],
    },
    Layout {
        name: "4 columns",
        blocks: &[
            block(0.0, 0.0, 0.25, 1.0),
            block(0.25, 0.0, 0.25, 1.0),
            block(0.5, 0.0, 0.25, 1.0),
            block(0.75, 0.0, 0.25, 1.0),
        ],
    },
];

const FIVE_UP: [Layout; 2] = [
    Layout {
        name: "2 top + 3 bottom",
        blocks: &[
            block(0.0, 0.0, 0.5, 0.5),
            block(0.5, 0.0, 0.5, 0.5),
            block(0.0, 0.5, THIRD, 0.5),
            block(THIRD, 0.5, THIRD, 0.5),
            block(TWO_THIRDS, 0.5, THIRD, 0.5),
        ],
    },
    Layout {
        name: "1 top + 4 bottom",
        blocks: &[
            block(0.0, 0.0, 1.0, 0.5),
            block(0.0, 0.5, 0.25, 0.5),
            block(0.25, 0.5, 0.25, 0.5),
            block(0.5, 0.5, 0.25, 0.5),
            block(0.75, 0.5, 0.25, 0.5),
        ],
    },
];

const SIX_UP: [Layout; 2] = [
    Layout {
        name: "3x2 Grid",
        blocks: &[
            block(0.0, 0.0, THIRD, 0.5),
            block(THIRD, 0.0, THIRD, 0.5),
            block(TWO_THIRDS, 0.0, THIRD, 0.5),
            block(0.0, 0.5, THIRD, 0.5),
            block(THIRD, 0.5, THIRD, 0.5),
            block(TWO_THIRDS, 0.5, THIRD, 0.5),
        ],
    },
    Layout {
        name: "2x3 Grid",
        blocks: &[
            block(0.0, 0.0, 0.5, THIRD),
            block(0.5, 0.0, 0.5, THIRD),
            block(0.0, THIRD, 0.5, THIRD),
            block(0.5, THIRD, 0.5, THIRD),
            block(0.0, TWO_THIRDS, 0.5, THIRD),
            block(0.5, TWO_THIRDS, 0.5, THIRD),
        ],
    },
];

/// All layouts valid for the given image count.
///
/// Returns an empty slice for unsupported counts.
pub fn layouts_for(count: u32) -> &'static [Layout] {
    match count {
        2 => &TWO_UP,
        3 => &THREE_UP,
        4 => &FOUR_UP,
        5 => &FIVE_UP,
        6 => &SIX_UP,
        _ => &[],
    }
}
