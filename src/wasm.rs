//! WASM bindings for Nodal Core.
//!
//! This module provides JavaScript-friendly bindings so the schematic
//! editor can solve circuits in the browser without a server round trip.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSolver } from 'nodal_core';
//!
//! await init();
//!
//! const solver = new WasmSolver();
//! const circuit = {
//!   nodeCount: 2,
//!   resistors: [{ n1: 1, n2: 0, value: 1000 }],
//!   voltageSources: [{ nPlus: 1, nMinus: 0, value: 10 }],
//! };
//! const result = JSON.parse(solver.solve(JSON.stringify(circuit)));
//! console.log(result.voltages.n1); // 10
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::normalize;
use crate::dsl;
use crate::error::NodalError;
use crate::solver::{Solver, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: NodalError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn output_error(err: serde_json::Error) -> JsValue {
    to_js(NodalError::OutputError {
        message: err.to_string(),
    })
}

/// WASM-compatible DC circuit solver.
#[wasm_bindgen]
pub struct WasmSolver {
    solver: Solver,
}

#[wasm_bindgen]
impl WasmSolver {
    /// Create a solver with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSolver {
        WasmSolver {
            solver: Solver::new(),
        }
    }

    /// Create a solver with custom configuration.
    ///
    /// # Arguments
    /// * `pivot_tolerance` - Largest pivot magnitude treated as zero (default: 0)
    /// * `report_components` - Fill `componentResults` when maps are supplied
    #[wasm_bindgen]
    pub fn with_config(pivot_tolerance: f64, report_components: bool) -> WasmSolver {
        let config = SolverConfig::new()
            .with_pivot_tolerance(pivot_tolerance)
            .with_component_results(report_components);
        WasmSolver {
            solver: Solver::with_config(config),
        }
    }

    /// Solve a JSON circuit payload, returning the solution as JSON.
    ///
    /// Throws a string describing the failure for invalid input or a
    /// singular circuit.
    #[wasm_bindgen]
    pub fn solve(&self, payload_json: &str) -> Result<String, JsValue> {
        let solution = self.solver.solve_json(payload_json).map_err(to_js)?;
        solution.to_json().map_err(output_error)
    }

    /// Solve a netlist, returning the solution as JSON.
    ///
    /// The result carries an extra `namedVoltages` object keyed by the
    /// netlist's own node labels.
    #[wasm_bindgen]
    pub fn solve_netlist(&self, netlist: &str) -> Result<String, JsValue> {
        let schematic = dsl::parse_schematic(netlist).map_err(to_js)?;
        let normalized = normalize(&schematic).map_err(to_js)?;
        let solution = self.solver.solve(&normalized.payload).map_err(to_js)?;

        serde_json::to_string(&normalized.labelled(&solution)).map_err(output_error)
    }

    /// Get the configured pivot tolerance.
    #[wasm_bindgen(getter)]
    pub fn pivot_tolerance(&self) -> f64 {
        self.solver.config().pivot_tolerance
    }
}

impl Default for WasmSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
