//! Photogrid WASM - WebAssembly bindings for Photogrid
//!
//! This crate exposes the photogrid-core compositing engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - Stateful collage session: configuration, slots, gestures,
//!   and export
//! - `catalog` - Static catalogs (aspect ratios, layouts, export sizes)
//!   serialized for the UI
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { CollageSession } from '@photogrid/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new CollageSession();
//! session.assign_image(0, new Uint8Array(await file.arrayBuffer()));
//! const exported = session.export();
//! download(exported.name, exported.bytes);
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod session;
mod types;

// Re-export public types
pub use catalog::{aspect_ratios, export_sizes, gap_options, image_counts, layouts};
pub use session::CollageSession;
pub use types::JsExportedFile;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
