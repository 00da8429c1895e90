//! WebAssembly bindings for the Goatan layout engine.
//!
//! This module exposes layout to JavaScript through wasm-bindgen. The
//! browser owns the sprites; it hands over snapshot JSON and gets back the
//! positioned render items to draw.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::generator::BoardGenerator;
#[cfg(feature = "wasm")]
use crate::geometry::TileDimensions;
#[cfg(feature = "wasm")]
use crate::placement::PlacementEngine;
#[cfg(feature = "wasm")]
use crate::redraw::{compose_frame, Diagnostic};
#[cfg(feature = "wasm")]
use crate::render::RenderItem;
#[cfg(feature = "wasm")]
use crate::snapshot::BoardSnapshot;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
#[derive(serde::Serialize)]
struct LayoutJson {
    items: Vec<RenderItem>,
    diagnostics: Vec<Diagnostic>,
}

/// WASM-exposed layout engine
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmLayout {
    engine: PlacementEngine,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmLayout {
    /// Create a layout engine for the given sprite dimensions
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, horizontal_width: f64) -> Result<WasmLayout, JsValue> {
        let dimensions = TileDimensions::new(width, height, horizontal_width)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmLayout {
            engine: PlacementEngine::new(dimensions),
        })
    }

    /// Lay out a snapshot, returning `{items, diagnostics}` as JSON
    pub fn layout(&self, snapshot_json: &str) -> Result<String, JsValue> {
        let snapshot: BoardSnapshot = serde_json::from_str(snapshot_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid snapshot JSON: {}", e)))?;
        snapshot
            .validate()
            .map_err(|e| JsValue::from_str(&format!("Rejected snapshot: {}", e)))?;
        let registry = self
            .engine
            .place(&snapshot.board)
            .map_err(|e| JsValue::from_str(&format!("Rejected snapshot: {}", e)))?;

        let (items, diagnostics) = compose_frame(&snapshot, &registry);
        serde_json::to_string(&LayoutJson { items, diagnostics })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Generate a board graph as JSON. A seed of 0 uses fresh randomness.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = generateBoard)]
pub fn generate_board(radius: u32, seed: u64) -> String {
    use rand::SeedableRng;

    let generator = BoardGenerator::new(radius);
    let graph = if seed == 0 {
        generator.generate()
    } else {
        generator.generate_with_rng(&mut rand::rngs::StdRng::seed_from_u64(seed))
    };
    serde_json::to_string(&graph).unwrap_or_else(|_| "{}".to_string())
}
