//! Stateful collage session for the browser UI.
//!
//! `CollageSession` owns the configuration surface (image count, aspect
//! ratio, layout, gap, export size, background, corner radius), the slot
//! store, and the gesture controller. The UI forwards wheel/pointer events
//! and file bytes here and reads back display rectangles for the live
//! preview; `export` composes and encodes the final PNG.

use photogrid_core::compose::{ComposeSettings, Rgb};
use photogrid_core::export::export_png;
use photogrid_core::gesture::GestureController;
use photogrid_core::layout::{
    layouts_for, Layout, ASPECT_RATIOS, EXPORT_SIZES, GAP_OPTIONS, IMAGE_COUNTS,
    MAX_BORDER_RADIUS,
};
use photogrid_core::slot::{PanZoomUpdate, SlotStore};
use photogrid_core::transform::display_rect;
use wasm_bindgen::prelude::*;

use crate::types::JsExportedFile;

/// A collage editing session.
#[wasm_bindgen]
pub struct CollageSession {
    image_count: u32,
    aspect_index: usize,
    layout_index: usize,
    gap: u32,
    border_radius: u32,
    base_size: u32,
    background: Rgb,
    slots: SlotStore,
    gestures: GestureController,
}

impl Default for CollageSession {
    fn default() -> Self {
        Self {
            image_count: IMAGE_COUNTS[0],
            aspect_index: 0,
            layout_index: 0,
            gap: GAP_OPTIONS[0],
            border_radius: 0,
            base_size: EXPORT_SIZES[0],
            background: Rgb::BLACK,
            slots: SlotStore::new(),
            gestures: GestureController::new(),
        }
    }
}

impl CollageSession {
    /// The active layout. Falls back to the first layout for the count when
    /// the stored index is stale.
    fn current_layout(&self) -> &'static Layout {
        let layouts = layouts_for(self.image_count);
        layouts.get(self.layout_index).unwrap_or(&layouts[0])
    }

    fn settings(&self) -> ComposeSettings {
        ComposeSettings {
            aspect_ratio: ASPECT_RATIOS[self.aspect_index],
            base_size: self.base_size,
            gap: self.gap,
            border_radius: self.border_radius,
            background: self.background,
        }
    }

    /// Compose and encode with an explicit timestamp. Backs `export`; also
    /// directly testable off the browser.
    pub fn export_with_timestamp(&self, timestamp_ms: u64) -> Result<JsExportedFile, String> {
        export_png(self.current_layout(), &self.slots, &self.settings(), timestamp_ms)
            .map(|file| JsExportedFile::new(file.name, file.bytes))
            .map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl CollageSession {
    /// Create a session with default configuration: 2 images, 1:1 aspect,
    /// first layout, no gap, 1080px export, black background.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CollageSession {
        CollageSession::default()
    }

    // ----- configuration surface -----

    /// Set the image count. Resets the layout selection and clears all
    /// slots. Counts outside the catalog are ignored.
    pub fn set_image_count(&mut self, count: u32) -> bool {
        if !IMAGE_COUNTS.contains(&count) {
            return false;
        }
        self.image_count = count;
        self.layout_index = 0;
        self.slots.clear();
        self.gestures = GestureController::new();
        true
    }

    /// Select a layout among those valid for the current image count.
    /// Clears all slots. Out-of-range indices are ignored.
    pub fn set_layout(&mut self, index: usize) -> bool {
        if index >= layouts_for(self.image_count).len() {
            return false;
        }
        self.layout_index = index;
        self.slots.clear();
        self.gestures = GestureController::new();
        true
    }

    /// Select an aspect ratio from the catalog by index.
    pub fn set_aspect_ratio(&mut self, index: usize) -> bool {
        if index >= ASPECT_RATIOS.len() {
            return false;
        }
        self.aspect_index = index;
        true
    }

    /// Set the export base size. Sizes outside the catalog are ignored.
    pub fn set_export_size(&mut self, base: u32) -> bool {
        if !EXPORT_SIZES.contains(&base) {
            return false;
        }
        self.base_size = base;
        true
    }

    /// Set the block gap. Values outside the catalog are ignored.
    pub fn set_gap(&mut self, gap: u32) -> bool {
        if !GAP_OPTIONS.contains(&gap) {
            return false;
        }
        self.gap = gap;
        true
    }

    /// Set the corner radius, clamped to the supported range.
    pub fn set_border_radius(&mut self, radius: u32) {
        self.border_radius = radius.min(MAX_BORDER_RADIUS);
    }

    /// Set the background color from a hex string like "#1a1a2e".
    pub fn set_background_color(&mut self, hex: &str) -> bool {
        match Rgb::from_hex(hex) {
            Some(color) => {
                self.background = color;
                true
            }
            None => false,
        }
    }

    pub fn image_count(&self) -> u32 {
        self.image_count
    }

    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn aspect_index(&self) -> usize {
        self.aspect_index
    }

    pub fn base_size(&self) -> u32 {
        self.base_size
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn border_radius(&self) -> u32 {
        self.border_radius
    }

    // ----- slots -----

    /// Assign image bytes to a block. Non-image sources are silently
    /// rejected and the slot is left unchanged. Replacing a slot
    /// invalidates any drag in progress on it.
    pub fn assign_image(&mut self, index: usize, bytes: &[u8]) -> bool {
        if index >= self.image_count as usize {
            return false;
        }
        let assigned = self.slots.assign(index, bytes.to_vec());
        if assigned {
            self.gestures.invalidate(index);
        }
        assigned
    }

    /// Remove a block's image, releasing its resources.
    pub fn remove_image(&mut self, index: usize) -> bool {
        self.gestures.invalidate(index);
        self.slots.remove(index)
    }

    /// Exchange two blocks' images, including empty state.
    pub fn swap_images(&mut self, i: usize, j: usize) {
        self.gestures.invalidate(i);
        self.gestures.invalidate(j);
        self.slots.swap(i, j);
    }

    /// Whether a block has an image assigned.
    pub fn is_filled(&self, index: usize) -> bool {
        self.slots.is_filled(index)
    }

    /// Natural (orientation-corrected) width of a block's image.
    pub fn natural_width(&self, index: usize) -> Option<u32> {
        self.slots.get(index).map(|s| s.natural_width)
    }

    /// Natural (orientation-corrected) height of a block's image.
    pub fn natural_height(&self, index: usize) -> Option<u32> {
        self.slots.get(index).map(|s| s.natural_height)
    }

    /// Set a block's full pan/zoom state (values clamped).
    pub fn set_transform(&mut self, index: usize, scale: f64, offset_x: f64, offset_y: f64) -> bool {
        self.slots
            .transform(index, PanZoomUpdate::full(scale, offset_x, offset_y))
    }

    /// A block's pan/zoom state as `{scale, offset_x, offset_y}`, or null.
    pub fn slot_view(&self, index: usize) -> JsValue {
        match self.slots.get(index) {
            Some(slot) => serde_wasm_bindgen::to_value(&slot.view).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Display-space covering rectangle for the live preview, as
    /// `{x, y, w, h}` relative to the block's top-left corner. Null for an
    /// empty slot or a degenerate box.
    pub fn preview_rect(&self, index: usize, box_w: f64, box_h: f64) -> JsValue {
        let Some(slot) = self.slots.get(index) else {
            return JsValue::NULL;
        };
        match display_rect(
            slot.natural_width,
            slot.natural_height,
            box_w,
            box_h,
            &slot.view,
        ) {
            Some(rect) => serde_wasm_bindgen::to_value(&rect).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    // ----- gestures -----

    /// Apply a wheel-zoom delta to a block.
    pub fn wheel(&mut self, index: usize, delta_y: f64) -> bool {
        self.gestures.wheel(&mut self.slots, index, delta_y)
    }

    /// Begin a drag on a block at the given pointer position.
    pub fn drag_start(&mut self, index: usize, x: f64, y: f64) -> bool {
        self.gestures.drag_start(&self.slots, index, x, y)
    }

    /// Update the active drag from the current pointer position and the
    /// on-screen block size.
    pub fn drag_move(&mut self, x: f64, y: f64, box_w: f64, box_h: f64) -> bool {
        self.gestures.drag_move(&mut self.slots, x, y, box_w, box_h)
    }

    /// End the active drag.
    pub fn drag_end(&mut self) {
        self.gestures.drag_end();
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    // ----- export -----

    /// Compose the collage at the configured export size and encode it to
    /// PNG, named with the current timestamp. A failed decode aborts the
    /// whole export.
    pub fn export(&self) -> Result<JsExportedFile, JsValue> {
        self.export_with_timestamp(js_sys::Date::now() as u64)
            .map_err(|message| {
                web_sys::console::error_1(&JsValue::from_str(&message));
                JsValue::from_str(&message)
            })
    }
}
