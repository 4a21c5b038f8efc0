//! Cover-fit transform: the mapping between a slot's pan/zoom state and
//! either its on-screen placement (preview) or its source crop (render).
//!
//! # Coordinate Spaces
//!
//! - **Display space**: pixels relative to the block's top-left corner. The
//!   covering rectangle is larger than the block on at least one axis; the
//!   block acts as a window onto it.
//! - **Source space**: pixels of the natural image. The crop rectangle is a
//!   sub-region of the source; zooming in shrinks it.
//!
//! Both modes are pure functions of the same five inputs and describe the
//! same visual crop, so the interactive preview and the exporter agree
//! bit-for-bit at any resolution.

mod cover;

pub use cover::{display_rect, max_pan, source_crop, DisplayRect, SourceCrop};
