//! Browser entry points for the growth engine.
//!
//! The page owns parsing, charting and playback; this crate only turns numbers
//! into series. Errors cross the boundary as strings.

mod model;

pub use model::WasmGrowthModel;

use growth_core::{Method, Parameters};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Entry of the method picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct MethodInfo {
    id: &'static str,
    label: &'static str,
    order: Option<u32>,
}

fn method_catalog() -> Vec<MethodInfo> {
    Method::ALL
        .into_iter()
        .map(|method| MethodInfo {
            id: method.id(),
            label: method.label(),
            order: method.order(),
        })
        .collect()
}

/// Lists the selectable methods as `[{ id, label, order }]`.
#[wasm_bindgen]
pub fn available_methods() -> Result<JsValue, JsValue> {
    to_value(&method_catalog())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Solves one request given as a `Parameters`-shaped object and returns
/// `{ method, times, primary, reference }`.
#[wasm_bindgen]
pub fn compute_growth(params: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let params: Parameters = from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Failed to read parameters: {}", e)))?;
    let solution = model::run(&params).map_err(model::to_js_error)?;

    to_value(&solution).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
