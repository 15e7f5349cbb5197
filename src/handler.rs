//! Request handling for the `/simulate` endpoint.
//!
//! The handler is transport-agnostic: it takes the raw JSON request body
//! and returns a status code plus a JSON response body. Any HTTP server
//! (or a serverless function) can forward requests to it unchanged.

use serde::Serialize;

use crate::error::{ErrorKind, NodalError};
use crate::solver::Solver;

/// Status and body of a handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: String,
}

/// JSON body of a failed request.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    kind: &'a str,
    details: String,
}

/// Status code for a failure class.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::InvalidInput => 400,
        ErrorKind::Unsolvable => 422,
        ErrorKind::Io => 500,
    }
}

/// Build the failure response for an error.
pub fn error_response(err: &NodalError) -> HandlerResponse {
    let kind = err.kind();
    let error = match kind {
        ErrorKind::InvalidInput => "Invalid circuit",
        ErrorKind::Unsolvable => "Singular matrix / cannot solve",
        ErrorKind::Io => "Simulation failed",
    };
    let body = ErrorBody {
        error,
        kind: kind.as_str(),
        details: err.to_string(),
    };
    HandlerResponse {
        status: status_for(kind),
        // ErrorBody only holds strings, so serialization cannot fail
        body: serde_json::to_string(&body).unwrap_or_default(),
    }
}

/// Handle a simulate request body.
pub fn handle_simulate(body: &str, solver: &Solver) -> HandlerResponse {
    let result = solver
        .solve_json(body)
        .and_then(|solution| {
            solution.to_json().map_err(|e| NodalError::OutputError {
                message: e.to_string(),
            })
        });

    match result {
        Ok(body) => HandlerResponse { status: 200, body },
        Err(err) => {
            log::info!("simulate request failed: {}", err);
            error_response(&err)
        }
    }
}
