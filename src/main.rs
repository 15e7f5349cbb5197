//! Nodal - DC circuit solver
//!
//! Solves resistor / voltage-source networks by Modified Nodal Analysis.
//!
//! # Usage
//!
//! ```bash
//! nodal circuit.json --pretty
//! cat divider.net | nodal --format netlist
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use nodal_core::{
    circuit::normalize,
    dsl,
    error::{NodalError, Result},
    Solver, SolverConfig, DEFAULT_PIVOT_TOLERANCE,
};

/// Input format accepted on FILE or stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Index-based circuit payload (`nodeCount`, `resistors`, ...)
    Json,
    /// Netlist text with named nodes
    Netlist,
}

/// DC circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Largest pivot magnitude treated as zero
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE, value_parser = parse_tolerance)]
    pivot_tolerance: f64,

    /// Omit per-component results
    #[arg(long)]
    no_components: bool,

    /// Fail when the solution contains NaN or infinite values
    #[arg(long)]
    reject_non_finite: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_tolerance(text: &str) -> std::result::Result<f64, String> {
    let value: f64 = text.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("pivot tolerance must be a finite, non-negative number (got {})", text))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| NodalError::FileReadError {
            path: path.display().to_string(),
            source: e,
        }),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| NodalError::FileReadError {
                    path: "<stdin>".to_string(),
                    source: e,
                })?;
            Ok(text)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(|e| NodalError::OutputError {
        message: e.to_string(),
    })
}

fn run(args: &Args) -> Result<String> {
    let config = SolverConfig::new()
        .with_pivot_tolerance(args.pivot_tolerance)
        .with_component_results(!args.no_components)
        .with_reject_non_finite(args.reject_non_finite);
    let solver = Solver::with_config(config);

    let text = read_input(args.input.as_ref())?;
    log::info!("read {} bytes of {:?} input", text.len(), args.format);

    match args.format {
        Format::Json => {
            let solution = solver.solve_json(&text)?;
            to_json(&solution, args.pretty)
        }
        Format::Netlist => {
            let schematic = dsl::parse_schematic(&text)?;
            let normalized = normalize(&schematic)?;
            let solution = solver.solve(&normalized.payload)?;
            to_json(&normalized.labelled(&solution), args.pretty)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let output = run(&args).and_then(|json| {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).map_err(|e| NodalError::OutputError {
            message: e.to_string(),
        })
    });

    match output {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
