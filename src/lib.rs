//! # Nodal Core
//!
//! A DC circuit solver for resistor and voltage-source networks.
//!
//! This library provides:
//! - Modified Nodal Analysis (MNA) matrix assembly
//! - Dense Gaussian elimination with partial pivoting
//! - Per-node, per-source and per-component results as JSON
//! - A small netlist format and a topology normalizer for labelled schematics
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Payload types, validation and topology normalization
//! - [`components`] - Component models (resistor, voltage source)
//! - [`solver`] - MNA assembly, elimination and result projection
//! - [`dsl`] - Parser for the netlist text format
//! - [`handler`] - Transport-agnostic JSON request handler
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! echo '{"nodeCount":2,"resistors":[{"n1":1,"n2":0,"value":1000}],
//!        "voltageSources":[{"nPlus":1,"nMinus":0,"value":10}]}' | nodal
//! nodal --format netlist divider.net --pretty
//! ```
//!
//! ### Library
//!
//! ```
//! use nodal_core::{solve, CircuitPayload};
//!
//! let payload = CircuitPayload::new(2)
//!     .with_resistor(1, 0, 1000.0)
//!     .with_voltage_source(1, 0, 10.0);
//! let solution = solve(&payload).unwrap();
//! assert_eq!(solution.voltages["n1"], 10.0);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmSolver } from 'nodal_core';
//!
//! const solver = new WasmSolver();
//! const result = JSON.parse(solver.solve(JSON.stringify(circuit)));
//! ```
//!
//! ## Solution Method
//!
//! For a circuit with N non-ground nodes and M voltage sources:
//!
//! 1. Stamp every resistor and source into the (N+M)×(N+M) matrix A and vector b
//! 2. Solve Ax = b by Gaussian elimination with partial pivoting
//! 3. Read node voltages from x[0..N] and source currents from x[N..N+M]
//!
//! A zero pivot means the circuit has no unique solution (a floating node or
//! conflicting sources) and is reported as [`NodalError::SingularMatrix`].

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod handler;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{normalize, Circuit, CircuitPayload, Schematic};
pub use error::{ErrorKind, NodalError, Result};
pub use solver::{ComponentResult, Solution, Solver, SolverConfig, DEFAULT_PIVOT_TOLERANCE};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSolver;

/// Solve a payload with the default configuration.
pub fn solve(payload: &CircuitPayload) -> Result<Solution> {
    Solver::new().solve(payload)
}

/// Decode and solve a JSON payload with the default configuration.
pub fn solve_json(text: &str) -> Result<Solution> {
    Solver::new().solve_json(text)
}
