//! Static catalogs serialized for the UI.
//!
//! The browser UI renders aspect-ratio pickers and layout previews from
//! these; the normalized block rectangles double as CSS percentage
//! positions.

use photogrid_core::layout;
use wasm_bindgen::prelude::*;

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Fixed aspect ratio catalog as `[{width, height}, ...]`.
#[wasm_bindgen]
pub fn aspect_ratios() -> JsValue {
    to_js(&layout::ASPECT_RATIOS)
}

/// Supported image counts.
#[wasm_bindgen]
pub fn image_counts() -> JsValue {
    to_js(&layout::IMAGE_COUNTS)
}

/// Export base sizes (longer side, in pixels).
#[wasm_bindgen]
pub fn export_sizes() -> JsValue {
    to_js(&layout::EXPORT_SIZES)
}

/// Gap steps in reference-canvas pixels.
#[wasm_bindgen]
pub fn gap_options() -> JsValue {
    to_js(&layout::GAP_OPTIONS)
}

/// Layouts valid for an image count, as
/// `[{name, blocks: [{x, y, w, h}, ...]}, ...]`.
#[wasm_bindgen]
pub fn layouts(count: u32) -> JsValue {
    to_js(&layout::layouts_for(count))
}
