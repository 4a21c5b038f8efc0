//! Slot storage: per-block image assignment and pan/zoom state.
//!
//! A slot owns its source bytes; dropping the slot (on removal, replacement,
//! or store reset) releases them. Slots are keyed by block index - dense in
//! practice but gaps are fine when a block was never filled or was cleared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decode::probe_source;
use crate::PanZoom;

/// An assigned image: owned source bytes, probed natural dimensions, and the
/// current pan/zoom state.
#[derive(Debug, Clone)]
pub struct Slot {
    source: Vec<u8>,
    /// Natural width in pixels (orientation-corrected).
    pub natural_width: u32,
    /// Natural height in pixels (orientation-corrected).
    pub natural_height: u32,
    /// Pan/zoom state.
    pub view: PanZoom,
}

impl Slot {
    /// The raw source bytes.
    pub fn source(&self) -> &[u8] {
        &self.source
    }
}

/// A partial pan/zoom update. `None` fields keep the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanZoomUpdate {
    pub scale: Option<f64>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

impl PanZoomUpdate {
    /// Update all three components at once.
    pub fn full(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: Some(scale),
            offset_x: Some(offset_x),
            offset_y: Some(offset_y),
        }
    }
}

/// Indexed collection of slots with explicit assign/remove/swap operations.
#[derive(Debug, Clone, Default)]
pub struct SlotStore {
    slots: BTreeMap<usize, Slot>,
}

impl SlotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an image source to a block index.
    ///
    /// The source is sniffed and its header probed; a non-image source is
    /// silently rejected (the slot is left unchanged and `false` returned).
    /// On success any prior slot at that index is replaced, its bytes
    /// released, and the view reset to the base cover fit.
    pub fn assign(&mut self, index: usize, bytes: Vec<u8>) -> bool {
        let Ok(info) = probe_source(&bytes) else {
            return false;
        };
        let (natural_width, natural_height) = info.oriented_dimensions();
        self.slots.insert(
            index,
            Slot {
                source: bytes,
                natural_width,
                natural_height,
                view: PanZoom::default(),
            },
        );
        true
    }

    /// Merge a partial pan/zoom update into a slot.
    ///
    /// Values are clamped to their valid ranges. No-op (returning `false`)
    /// if the slot is empty.
    pub fn transform(&mut self, index: usize, update: PanZoomUpdate) -> bool {
        let Some(slot) = self.slots.get_mut(&index) else {
            return false;
        };
        if let Some(scale) = update.scale {
            slot.view.scale = scale.clamp(PanZoom::MIN_SCALE, PanZoom::MAX_SCALE);
        }
        if let Some(offset_x) = update.offset_x {
            slot.view.offset_x = offset_x.clamp(-1.0, 1.0);
        }
        if let Some(offset_y) = update.offset_y {
            slot.view.offset_y = offset_y.clamp(-1.0, 1.0);
        }
        true
    }

    /// Remove a slot, releasing its owned bytes. Returns whether a slot was
    /// actually removed.
    pub fn remove(&mut self, index: usize) -> bool {
        self.slots.remove(&index).is_some()
    }

    /// Exchange two slots' contents, including empty state.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let a = self.slots.remove(&i);
        let b = self.slots.remove(&j);
        if let Some(b) = b {
            self.slots.insert(i, b);
        }
        if let Some(a) = a {
            self.slots.insert(j, a);
        }
    }

    /// Remove all slots, releasing all owned bytes.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Get the slot at a block index, if filled.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(&index)
    }

    /// Whether the slot at a block index is filled.
    pub fn is_filled(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are filled.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;

    fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&color);
        }
        encode_png(&pixels, width, height).unwrap()
    }

    #[test]
    fn test_assign_valid_image() {
        let mut store = SlotStore::new();
        assert!(store.assign(0, solid_png(40, 30, [255, 0, 0])));

        let slot = store.get(0).unwrap();
        assert_eq!(slot.natural_width, 40);
        assert_eq!(slot.natural_height, 30);
        assert!(slot.view.is_default());
    }

    #[test]
    fn test_assign_non_image_silently_rejected() {
        let mut store = SlotStore::new();
        assert!(!store.assign(0, b"not an image at all".to_vec()));
        assert!(!store.is_filled(0));
    }

    #[test]
    fn test_assign_non_image_keeps_existing_slot() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));
        store.transform(0, PanZoomUpdate::full(2.0, 0.5, 0.0));

        assert!(!store.assign(0, b"garbage".to_vec()));

        // Prior slot untouched, including its view state
        let slot = store.get(0).unwrap();
        assert_eq!(slot.natural_width, 40);
        assert_eq!(slot.view.scale, 2.0);
    }

    #[test]
    fn test_assign_replaces_and_resets_view() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));
        store.transform(0, PanZoomUpdate::full(3.0, 1.0, -1.0));

        store.assign(0, solid_png(20, 10, [0, 255, 0]));

        let slot = store.get(0).unwrap();
        assert_eq!(slot.natural_width, 20);
        assert_eq!(slot.natural_height, 10);
        assert!(slot.view.is_default());
    }

    #[test]
    fn test_transform_merges_partial_update() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));

        assert!(store.transform(
            0,
            PanZoomUpdate {
                scale: Some(2.0),
                ..Default::default()
            }
        ));
        let slot = store.get(0).unwrap();
        assert_eq!(slot.view.scale, 2.0);
        assert_eq!(slot.view.offset_x, 0.0);

        assert!(store.transform(
            0,
            PanZoomUpdate {
                offset_x: Some(0.5),
                ..Default::default()
            }
        ));
        let slot = store.get(0).unwrap();
        assert_eq!(slot.view.scale, 2.0);
        assert_eq!(slot.view.offset_x, 0.5);
    }

    #[test]
    fn test_transform_clamps_out_of_range() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));

        store.transform(0, PanZoomUpdate::full(99.0, -7.0, 7.0));

        let slot = store.get(0).unwrap();
        assert_eq!(slot.view.scale, PanZoom::MAX_SCALE);
        assert_eq!(slot.view.offset_x, -1.0);
        assert_eq!(slot.view.offset_y, 1.0);
    }

    #[test]
    fn test_transform_empty_slot_is_noop() {
        let mut store = SlotStore::new();
        assert!(!store.transform(3, PanZoomUpdate::full(2.0, 0.0, 0.0)));
        assert!(!store.is_filled(3));
    }

    #[test]
    fn test_remove() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));

        assert!(store.remove(0));
        assert!(!store.is_filled(0));
        assert!(!store.remove(0));
    }

    #[test]
    fn test_swap_filled_slots() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));
        store.assign(1, solid_png(20, 10, [0, 255, 0]));

        store.swap(0, 1);

        assert_eq!(store.get(0).unwrap().natural_width, 20);
        assert_eq!(store.get(0).unwrap().natural_height, 10);
        assert_eq!(store.get(1).unwrap().natural_width, 40);
        assert_eq!(store.get(1).unwrap().natural_height, 30);
    }

    #[test]
    fn test_swap_with_empty_slot() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));

        store.swap(0, 2);

        assert!(!store.is_filled(0));
        assert_eq!(store.get(2).unwrap().natural_width, 40);
    }

    #[test]
    fn test_swap_same_index() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));

        store.swap(0, 0);
        assert_eq!(store.get(0).unwrap().natural_width, 40);
    }

    #[test]
    fn test_clear() {
        let mut store = SlotStore::new();
        store.assign(0, solid_png(40, 30, [255, 0, 0]));
        store.assign(2, solid_png(20, 10, [0, 255, 0]));
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_filled(0));
        assert!(!store.is_filled(2));
    }
}
