//! WASM-compatible wrapper types.

use wasm_bindgen::prelude::*;

/// An exported collage file: suggested download name plus PNG bytes.
#[wasm_bindgen]
pub struct JsExportedFile {
    name: String,
    bytes: Vec<u8>,
}

impl JsExportedFile {
    pub(crate) fn new(name: String, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}

#[wasm_bindgen]
impl JsExportedFile {
    /// Suggested download file name, e.g. "combined-1700000000000.png".
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// PNG-encoded file contents (copied into a Uint8Array).
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Encoded size in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}
