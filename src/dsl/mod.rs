//! Netlist parser.
//!
//! A small SPICE-inspired text format for describing resistor networks,
//! used by the CLI and the WASM surface. Parsing yields a [`Schematic`]
//! with free-form node labels, which the topology normalizer turns into a
//! solver payload.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".ground" node | ".end"
//! component   = name node node ["DC"] value
//!
//! name        = ('R' | 'V') { letter | digit | '_' }
//! node        = identifier | integer
//! value       = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! `0` and `GND` always denote ground. Without them or a `.ground`
//! directive, the first node of the first element is ground.
//!
//! # Example
//!
//! ```text
//! # 9V divider
//! V1  vin  0    DC 9
//! R1  vin  out  10k
//! R2  out  0    10k
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::circuit::Schematic;
use crate::error::Result;

/// Parse netlist text into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse netlist text straight into a [`Schematic`].
pub fn parse_schematic(input: &str) -> Result<Schematic> {
    Ok(parse(input)?.into_schematic())
}
