//! Photogrid Core - collage layout and compositing library
//!
//! This crate provides the core functionality for Photogrid: the grid layout
//! catalog, per-slot pan/zoom state, the cover-fit transform, gesture
//! handling, and the compositor that renders the final collage to a PNG.

pub mod compose;
pub mod decode;
pub mod encode;
pub mod export;
pub mod gesture;
pub mod layout;
pub mod slot;
pub mod transform;

pub use compose::{compose, ComposeError, ComposeSettings, Rgb};
pub use export::{export_file_name, export_png, ExportError, ExportedFile};
pub use transform::{display_rect, max_pan, source_crop, DisplayRect, SourceCrop};

/// Pan/zoom state for a single slot.
///
/// `scale` is the zoom factor relative to the base cover fit. Offsets are
/// expressed as fractions of the maximum pan range at the current scale,
/// in [-1, 1], which keeps them independent of box and image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanZoom {
    /// Zoom factor (1.0 to 5.0). 1.0 is the base cover fit.
    pub scale: f64,
    /// Horizontal pan as a fraction of the max pan range (-1.0 to 1.0).
    pub offset_x: f64,
    /// Vertical pan as a fraction of the max pan range (-1.0 to 1.0).
    pub offset_y: f64,
}

impl PanZoom {
    /// Minimum zoom factor (base cover fit).
    pub const MIN_SCALE: f64 = 1.0;
    /// Maximum zoom factor.
    pub const MAX_SCALE: f64 = 5.0;

    /// Create a new PanZoom at the base cover fit, centered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults (no zoom, no pan).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy with scale and offsets clamped to their valid ranges.
    pub fn clamped(self) -> Self {
        Self {
            scale: self.scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE),
            offset_x: self.offset_x.clamp(-1.0, 1.0),
            offset_y: self.offset_y.clamp(-1.0, 1.0),
        }
    }
}

impl Default for PanZoom {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}
