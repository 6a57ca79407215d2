//! Stateful wrapper around one computed solution.

use anyhow::{Context, Result};
use growth_core::{solve, Method, Parameters, Solution};
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub(crate) fn build_parameters(
    rate: f64,
    capacity: f64,
    initial_value: f64,
    start_time: f64,
    end_time: f64,
    steps: i32,
    method: &str,
) -> Result<Parameters> {
    let method = method.parse::<Method>().context("Unsupported method")?;
    Ok(Parameters {
        rate,
        capacity,
        initial_value,
        start_time,
        end_time,
        steps: i64::from(steps),
        method,
    })
}

pub(crate) fn run(params: &Parameters) -> Result<Solution> {
    solve(params).context("Invalid parameters")
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

/// A solved request the front end can query series by series.
#[wasm_bindgen]
pub struct WasmGrowthModel {
    solution: Solution,
}

#[wasm_bindgen]
impl WasmGrowthModel {
    #[wasm_bindgen(constructor)]
    pub fn new(
        rate: f64,
        capacity: f64,
        initial_value: f64,
        start_time: f64,
        end_time: f64,
        steps: i32,
        method: &str,
    ) -> Result<WasmGrowthModel, JsValue> {
        console_error_panic_hook::set_once();

        let params = build_parameters(
            rate,
            capacity,
            initial_value,
            start_time,
            end_time,
            steps,
            method,
        )
        .map_err(to_js_error)?;
        let solution = run(&params).map_err(to_js_error)?;

        Ok(WasmGrowthModel { solution })
    }

    pub fn times(&self) -> Vec<f64> {
        self.solution.times.clone()
    }

    pub fn primary(&self) -> Vec<f64> {
        self.solution.primary.clone()
    }

    pub fn reference(&self) -> Vec<f64> {
        self.solution.reference.clone()
    }

    pub fn method(&self) -> String {
        self.solution.method.id().to_string()
    }

    pub fn label(&self) -> String {
        self.solution.method.label().to_string()
    }

    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// False for the analytical method, whose reference is the primary curve.
    pub fn has_distinct_reference(&self) -> bool {
        self.solution.has_distinct_reference()
    }

    pub fn max_abs_deviation(&self) -> f64 {
        self.solution.max_abs_deviation()
    }

    pub fn deviations(&self) -> Float64Array {
        Float64Array::from(self.solution.deviations().as_slice())
    }
}
