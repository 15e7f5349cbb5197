//! MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the numerical engine for DC circuit analysis.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node voltages and branch currents
//! - A is the conductance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ 0 ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the conductance matrix (node equations)
//! - B, C = Bᵀ connect voltage sources to nodes
//! - v is the vector of node voltages
//! - j is the vector of voltage source currents
//! - e is the vector of voltage source values
//!
//! A solve runs validate → [`MnaMatrix::assemble`] → [`gauss::solve_system`]
//! → [`projector::project`], with nothing kept between calls.

pub mod gauss;
mod mna;
pub mod projector;

pub use mna::MnaMatrix;
pub use projector::{ComponentResult, Solution};

use crate::circuit::{BranchId, Circuit, CircuitPayload, NodeId, VarIndex};
use crate::error::{NodalError, Result};

/// Default pivot magnitude treated as zero (only exact zeros are singular).
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 0.0;

/// Configuration for the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Largest pivot magnitude still considered zero.
    pub pivot_tolerance: f64,
    /// Compute `componentResults` when the payload carries reporting maps.
    pub report_components: bool,
    /// Fail with [`NodalError::NumericalOverflow`] on NaN/infinite unknowns.
    pub reject_non_finite: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            report_components: true,
            reject_non_finite: false,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot tolerance.
    ///
    /// Raising it turns nearly-singular systems (for example a node tied to
    /// ground only through gigaohms next to milliohm wiring) into
    /// `SingularMatrix` errors instead of huge voltages.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    /// Enable or disable per-component reporting.
    pub fn with_component_results(mut self, report_components: bool) -> Self {
        self.report_components = report_components;
        self
    }

    /// Enable or disable rejection of non-finite results.
    pub fn with_reject_non_finite(mut self, reject_non_finite: bool) -> Self {
        self.reject_non_finite = reject_non_finite;
        self
    }
}

/// Stateless DC solver.
///
/// Holds only its configuration, so one instance can be shared across
/// threads and reused for any number of requests.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a circuit payload.
    pub fn solve(&self, payload: &CircuitPayload) -> Result<Solution> {
        let circuit = Circuit::from_payload(payload)?;
        let matrix = MnaMatrix::assemble(&circuit);
        let x = gauss::solve_system(&matrix, self.config.pivot_tolerance)?;
        self.check_finite(&circuit, &x)?;

        log::debug!("solved {} unknowns", x.len());
        Ok(projector::project(&circuit, payload, x, self.config.report_components))
    }

    /// Decode a JSON payload and solve it.
    pub fn solve_json(&self, text: &str) -> Result<Solution> {
        self.solve(&CircuitPayload::from_json(text)?)
    }

    fn check_finite(&self, circuit: &Circuit, x: &[f64]) -> Result<()> {
        let Some(i) = x.iter().position(|v| !v.is_finite()) else {
            return Ok(());
        };

        let n = circuit.num_unknown_nodes();
        let var = if i < n {
            VarIndex::Voltage(NodeId(i + 1))
        } else {
            VarIndex::Current(BranchId(i - n))
        };

        if self.config.reject_non_finite {
            return Err(NodalError::NumericalOverflow {
                unknown: var.label(),
                value: x[i],
            });
        }
        log::warn!("non-finite result for {} ({})", var.label(), x[i]);
        Ok(())
    }
}
