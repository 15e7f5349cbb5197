//! Circuit representation, validation and topology normalization.
//!
//! A request arrives either as an already-normalized [`CircuitPayload`] or
//! as a [`Schematic`] with free-form node labels that [`normalize`] turns
//! into one. [`Circuit::from_payload`] validates the payload and produces
//! the typed component list the assembler stamps.

mod graph;
mod payload;
pub mod topology;
mod types;
mod validate;

pub use graph::Circuit;
pub use payload::{CircuitPayload, ResistorEntry, ResistorSpec, VoltageSourceEntry, VoltageSourceSpec};
pub use topology::{normalize, Element, ElementKind, LabelledSolution, Normalized, Schematic};
pub use types::*;
pub use validate::{validate_payload, MAX_UNKNOWNS};
