//! Pan/zoom gesture handling.
//!
//! Wheel and pointer deltas become clamped pan/zoom updates on a slot. Drag
//! handling is an explicit state machine: `Idle` or `Dragging` with a
//! snapshot of the pointer position and offsets at drag start. Every drag
//! move recomputes from that snapshot instead of accumulating deltas, so a
//! drag cannot drift. Removing or replacing a slot mid-drag invalidates the
//! drag; later moves are no-ops.

use crate::slot::{PanZoomUpdate, SlotStore};
use crate::transform::max_pan;
use crate::PanZoom;

/// Scale change per wheel-delta unit. Wheel-up (negative delta) zooms in.
pub const WHEEL_SENSITIVITY: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        slot: usize,
        origin_x: f64,
        origin_y: f64,
        start_offset_x: f64,
        start_offset_y: f64,
    },
}

/// Converts zoom and drag input into slot pan/zoom updates.
///
/// Pointer capture is exclusive: at most one drag is active, and starting a
/// new drag replaces any stale prior drag.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureController {
    state: DragState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Apply a wheel-zoom delta to a slot.
    ///
    /// `new_scale = clamp(scale - delta_y * sensitivity, 1, 5)`. When
    /// zooming out, the stored offsets are re-clamped into [-1, 1]; they are
    /// deliberately not recomputed against the shrunken pan range, so the
    /// image may sit off-center right after zooming out. Returns `false`
    /// (no-op) on an empty slot.
    pub fn wheel(&mut self, store: &mut SlotStore, index: usize, delta_y: f64) -> bool {
        let Some(slot) = store.get(index) else {
            return false;
        };
        let view = slot.view;
        let new_scale =
            (view.scale - delta_y * WHEEL_SENSITIVITY).clamp(PanZoom::MIN_SCALE, PanZoom::MAX_SCALE);

        let (offset_x, offset_y) = if new_scale < view.scale {
            (view.offset_x.clamp(-1.0, 1.0), view.offset_y.clamp(-1.0, 1.0))
        } else {
            (view.offset_x, view.offset_y)
        };

        store.transform(index, PanZoomUpdate::full(new_scale, offset_x, offset_y))
    }

    /// Begin a drag on a slot, recording the pointer position and the slot's
    /// current offsets. A drag on an empty slot is a no-op (and clears any
    /// stale drag). Returns whether a drag started.
    pub fn drag_start(&mut self, store: &SlotStore, index: usize, x: f64, y: f64) -> bool {
        let Some(slot) = store.get(index) else {
            self.state = DragState::Idle;
            return false;
        };
        self.state = DragState::Dragging {
            slot: index,
            origin_x: x,
            origin_y: y,
            start_offset_x: slot.view.offset_x,
            start_offset_y: slot.view.offset_y,
        };
        true
    }

    /// Update the active drag from the current pointer position.
    ///
    /// The pixel delta since drag start is converted into a fractional
    /// offset against the max pan range at the slot's *current* scale and
    /// the given box size. An axis with no pan room is forced to offset 0.
    /// No-op when idle or when the dragged slot has been removed or
    /// replaced since the drag began.
    pub fn drag_move(
        &mut self,
        store: &mut SlotStore,
        x: f64,
        y: f64,
        box_w: f64,
        box_h: f64,
    ) -> bool {
        let DragState::Dragging {
            slot,
            origin_x,
            origin_y,
            start_offset_x,
            start_offset_y,
        } = self.state
        else {
            return false;
        };
        let Some(current) = store.get(slot) else {
            // Slot removed mid-drag: the drag is dead.
            self.state = DragState::Idle;
            return false;
        };
        let Some((max_pan_x, max_pan_y)) = max_pan(
            current.natural_width,
            current.natural_height,
            box_w,
            box_h,
            current.view.scale,
        ) else {
            return false;
        };

        let dx = x - origin_x;
        let dy = y - origin_y;

        let offset_x = if max_pan_x > 0.0 {
            (start_offset_x + dx / max_pan_x).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let offset_y = if max_pan_y > 0.0 {
            (start_offset_y + dy / max_pan_y).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        store.transform(
            slot,
            PanZoomUpdate {
                scale: None,
                offset_x: Some(offset_x),
                offset_y: Some(offset_y),
            },
        )
    }

    /// End the active drag, committing the last applied state.
    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Invalidate the drag if it targets the given slot. Called when a slot
    /// is removed or replaced so stale pointer events cannot mutate the new
    /// occupant.
    pub fn invalidate(&mut self, index: usize) {
        if let DragState::Dragging { slot, .. } = self.state {
            if slot == index {
                self.state = DragState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;

    /// 200x100 gray test image as encoded PNG.
    fn wide_png() -> Vec<u8> {
        let pixels = vec![128u8; 200 * 100 * 3];
        encode_png(&pixels, 200, 100).unwrap()
    }

    fn store_with_slot() -> SlotStore {
        let mut store = SlotStore::new();
        assert!(store.assign(0, wide_png()));
        store
    }

    #[test]
    fn test_wheel_zoom_in() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        // Wheel up (negative delta) zooms in
        assert!(gestures.wheel(&mut store, 0, -100.0));
        assert!((store.get(0).unwrap().view.scale - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_clamps_at_max() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        gestures.wheel(&mut store, 0, -100_000.0);
        assert_eq!(store.get(0).unwrap().view.scale, PanZoom::MAX_SCALE);
    }

    #[test]
    fn test_wheel_zoom_clamps_at_min() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        gestures.wheel(&mut store, 0, 100_000.0);
        assert_eq!(store.get(0).unwrap().view.scale, PanZoom::MIN_SCALE);
    }

    #[test]
    fn test_wheel_on_empty_slot_is_noop() {
        let mut store = SlotStore::new();
        let mut gestures = GestureController::new();

        assert!(!gestures.wheel(&mut store, 0, -100.0));
    }

    #[test]
    fn test_zoom_out_keeps_offsets_in_range() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        store.transform(0, PanZoomUpdate::full(2.0, 0.9, 0.9));
        // Zoom all the way back out
        gestures.wheel(&mut store, 0, 100_000.0);

        let view = store.get(0).unwrap().view;
        assert_eq!(view.scale, 1.0);
        assert!(view.offset_x <= 1.0 && view.offset_x >= -1.0);
        assert!(view.offset_y <= 1.0 && view.offset_y >= -1.0);
        // Offsets are re-validated, not recomputed: the stored fraction
        // survives the zoom-out.
        assert!((view.offset_x - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_drag_pans_slot() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        // Zoom to 2x in a 50x50 box: cover is 200x100, max pan (75, 25)
        store.transform(0, PanZoomUpdate::full(2.0, 0.0, 0.0));

        assert!(gestures.drag_start(&store, 0, 10.0, 10.0));
        assert!(gestures.drag_move(&mut store, 10.0 + 37.5, 10.0, 50.0, 50.0));

        let view = store.get(0).unwrap().view;
        assert!((view.offset_x - 0.5).abs() < 1e-9);
        assert_eq!(view.offset_y, 0.0);
    }

    #[test]
    fn test_drag_clamps_at_bounds() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();
        store.transform(0, PanZoomUpdate::full(2.0, 0.0, 0.0));

        gestures.drag_start(&store, 0, 0.0, 0.0);
        // Wildly fast pointer movement
        gestures.drag_move(&mut store, 10_000.0, -10_000.0, 50.0, 50.0);

        let view = store.get(0).unwrap().view;
        assert_eq!(view.offset_x, 1.0);
        assert_eq!(view.offset_y, -1.0);
    }

    #[test]
    fn test_drag_moves_recompute_from_snapshot() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();
        store.transform(0, PanZoomUpdate::full(2.0, 0.0, 0.0));

        gestures.drag_start(&store, 0, 0.0, 0.0);
        gestures.drag_move(&mut store, 37.5, 0.0, 50.0, 50.0);
        // Same pointer position again: offset must not double up
        gestures.drag_move(&mut store, 37.5, 0.0, 50.0, 50.0);

        let view = store.get(0).unwrap().view;
        assert!((view.offset_x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drag_axis_without_pan_room_forces_zero() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        // Scale 1 in a box matching the image's cover: vertical pan room is 0
        gestures.drag_start(&store, 0, 0.0, 0.0);
        gestures.drag_move(&mut store, 0.0, 30.0, 50.0, 50.0);

        assert_eq!(store.get(0).unwrap().view.offset_y, 0.0);
    }

    #[test]
    fn test_drag_on_empty_slot_is_noop() {
        let store = SlotStore::new();
        let mut gestures = GestureController::new();

        assert!(!gestures.drag_start(&store, 0, 0.0, 0.0));
        assert!(!gestures.is_dragging());
    }

    #[test]
    fn test_drag_move_when_idle_is_noop() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        assert!(!gestures.drag_move(&mut store, 10.0, 10.0, 50.0, 50.0));
        assert!(store.get(0).unwrap().view.is_default());
    }

    #[test]
    fn test_remove_mid_drag_invalidates() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();
        store.transform(0, PanZoomUpdate::full(2.0, 0.0, 0.0));

        gestures.drag_start(&store, 0, 0.0, 0.0);
        store.remove(0);
        gestures.invalidate(0);

        assert!(!gestures.is_dragging());
        assert!(!gestures.drag_move(&mut store, 30.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_stale_drag_detected_without_explicit_invalidate() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();
        store.transform(0, PanZoomUpdate::full(2.0, 0.0, 0.0));

        gestures.drag_start(&store, 0, 0.0, 0.0);
        store.remove(0);

        // Even without invalidate(), the move sees the missing slot and dies
        assert!(!gestures.drag_move(&mut store, 30.0, 0.0, 50.0, 50.0));
        assert!(!gestures.is_dragging());
    }

    #[test]
    fn test_invalidate_other_slot_keeps_drag() {
        let mut store = store_with_slot();
        let mut gestures = GestureController::new();

        gestures.drag_start(&store, 0, 0.0, 0.0);
        gestures.invalidate(5);

        assert!(gestures.is_dragging());
    }

    #[test]
    fn test_new_drag_replaces_prior() {
        let mut store = store_with_slot();
        assert!(store.assign(1, wide_png()));
        let mut gestures = GestureController::new();
        store.transform(0, PanZoomUpdate::full(2.0, 0.0, 0.0));
        store.transform(1, PanZoomUpdate::full(2.0, 0.0, 0.0));

        gestures.drag_start(&store, 0, 0.0, 0.0);
        gestures.drag_start(&store, 1, 0.0, 0.0);
        gestures.drag_move(&mut store, 37.5, 0.0, 50.0, 50.0);

        // Only the second drag's slot moved
        assert!(store.get(0).unwrap().view.offset_x.abs() < 1e-9);
        assert!((store.get(1).unwrap().view.offset_x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drag_end_returns_to_idle() {
        let store = store_with_slot();
        let mut gestures = GestureController::new();

        gestures.drag_start(&store, 0, 0.0, 0.0);
        assert!(gestures.is_dragging());
        gestures.drag_end();
        assert!(!gestures.is_dragging());
    }
}
