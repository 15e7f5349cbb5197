//! Component models for circuit simulation.
//!
//! The solver knows exactly two element kinds:
//! - [`Resistor`]: stamps a conductance between two nodes
//! - [`VoltageSource`]: stamps a branch-current unknown and a KVL row
//!
//! They form the closed union [`Component`]; assembly matches on it.

mod linear;
mod sources;

pub use linear::Resistor;
pub use sources::VoltageSource;

/// A circuit component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
}
