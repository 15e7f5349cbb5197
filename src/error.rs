//! Error types for the nodal solver.
//!
//! This module provides a unified error type [`NodalError`] that covers
//! all error conditions that can occur while decoding a circuit payload,
//! normalizing a schematic, parsing a netlist and solving the MNA system.
//!
//! Callers at a request boundary usually only care about [`ErrorKind`]:
//! whether the input was bad or the circuit itself has no unique solution.

use thiserror::Error;

/// Result type alias using [`NodalError`].
pub type Result<T> = std::result::Result<T, NodalError>;

/// Coarse classification of a [`NodalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was malformed or violates the payload contract.
    InvalidInput,
    /// The request was well-formed but the circuit has no unique solution.
    Unsolvable,
    /// Reading input or writing output failed.
    Io,
}

impl ErrorKind {
    /// Stable snake_case name, used in JSON error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Unsolvable => "unsolvable",
            ErrorKind::Io => "io",
        }
    }
}

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum NodalError {
    // ============ Payload Errors ============
    /// The payload could not be decoded
    #[error("Malformed circuit payload: {message}")]
    MalformedPayload { message: String },

    /// Node count below one (ground must always exist)
    #[error("Invalid node count {node_count}: a circuit needs at least the ground node")]
    InvalidNodeCount { node_count: i64 },

    /// A terminal references a node outside `[0, nodeCount)`
    #[error("{component}: terminal '{terminal}' references node {node}, but the circuit has {node_count} nodes")]
    NodeOutOfRange {
        component: String,
        terminal: &'static str,
        node: i64,
        node_count: usize,
    },

    /// The MNA system would exceed the dense-matrix size limit
    #[error("Circuit needs {unknowns} unknowns, more than the supported {limit}")]
    SystemTooLarge { unknowns: usize, limit: usize },

    /// A component value the solver cannot stamp
    #[error("{component}: invalid value {value}: {message}")]
    InvalidValue {
        component: String,
        value: f64,
        message: String,
    },

    // ============ Topology / Netlist Errors ============
    /// Invalid circuit topology
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    /// Duplicate component name
    #[error("Duplicate component name '{name}'")]
    DuplicateComponent { name: String },

    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    // ============ Solve Errors ============
    /// No non-zero pivot exists for an elimination column
    #[error("Singular matrix at column {column} - circuit has a floating node or conflicting voltage sources")]
    SingularMatrix { column: usize },

    /// A solved unknown is NaN or infinite
    #[error("Numerical overflow in '{unknown}' (value: {value:.2e})")]
    NumericalOverflow { unknown: String, value: f64 },

    // ============ I/O Errors ============
    /// Error reading a circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error serializing or writing the solution
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl NodalError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid topology error
    pub fn topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(component: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            component: component.into(),
            value,
            message: message.into(),
        }
    }

    /// Classify this error for a request boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodalError::SingularMatrix { .. } | NodalError::NumericalOverflow { .. } => {
                ErrorKind::Unsolvable
            }
            NodalError::FileReadError { .. } | NodalError::OutputError { .. } => ErrorKind::Io,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl From<serde_json::Error> for NodalError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload {
            message: err.to_string(),
        }
    }
}
