//! TOML problem files read by the CLI.
//!
//! ```toml
//! objective = [3.0, 4.0]
//!
//! [[constraints]]
//! a1 = 2.0
//! a2 = 3.0
//! b = 12.0
//! relation = "<="
//! ```
//!
//! Rows go through [`Problem::add_constraint`], so a row with both
//! coefficients zero is rejected like any other edit.

use std::path::Path;

use serde::Deserialize;

use super::diagnostic::ProblemFileError;
use crate::domain::{DomainError, Objective, Problem, Relation};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemFile {
    objective: [f64; 2],
    #[serde(default)]
    constraints: Vec<ConstraintRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintRow {
    a1: f64,
    a2: f64,
    b: f64,
    relation: String,
}

/// Parse problem file text into a [`Problem`].
///
/// # Errors
///
/// Returns a diagnostic pointing at the offending TOML, or naming the
/// constraint row that failed validation.
pub fn parse_problem(src: &str) -> Result<Problem, ProblemFileError> {
    let file: ProblemFile = toml::from_str(src).map_err(|err| {
        let diagnostic = ProblemFileError::new(err.message().to_string(), src);
        match err.span() {
            Some(span) => diagnostic.with_span(span.start, span.end - span.start),
            None => diagnostic,
        }
    })?;

    let [c1, c2] = file.objective;
    let objective = Objective::new(c1, c2).map_err(|err| {
        ProblemFileError::new(format!("objective: {err}"), src)
    })?;

    let mut problem = Problem::new(objective);
    for (i, row) in file.constraints.iter().enumerate() {
        let relation: Relation = row.relation.parse().map_err(|reason: String| {
            ProblemFileError::new(format!("constraint {}: {reason}", i + 1), src)
        })?;
        problem
            .add_constraint(row.a1, row.a2, row.b, relation)
            .map_err(|err| row_error(i, &err, src))?;
    }
    Ok(problem)
}

/// Read and parse a problem file.
///
/// # Errors
///
/// Returns a diagnostic for unreadable or invalid files.
pub fn load_problem(path: &Path) -> miette::Result<Problem> {
    let src = std::fs::read_to_string(path).map_err(|err| {
        miette::miette!(
            code = "planar_lp::problem_file",
            "failed to read problem file {}: {err}",
            path.display()
        )
    })?;
    Ok(parse_problem(&src)?)
}

fn row_error(index: usize, err: &DomainError, src: &str) -> ProblemFileError {
    let diagnostic = ProblemFileError::new(format!("constraint {}: {err}", index + 1), src);
    match err {
        DomainError::DegenerateConstraint { .. } => {
            diagnostic.with_help("at least one of a1 and a2 must be non-zero")
        }
        _ => diagnostic,
    }
}
