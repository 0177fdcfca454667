//! Solver port for two-variable linear programs.
//!
//! # Overview
//!
//! - [`Solver`]: maximise a [`Problem`] over the non-negative quadrant
//! - [`SolveResult`]: optimal vertex, or a first-class infeasible/unbounded outcome
//! - [`SimplexSolver`]: from-scratch two-phase simplex with Bland's rule
//! - [`MemoizedSolver`]: content-hash cache in front of any solver
//! - `HighsSolver`: HiGHS via good_lp (requires the `highs` feature)

#![allow(clippy::result_large_err)]

mod memo;
mod simplex;

#[cfg(feature = "highs")]
mod highs;

pub use memo::MemoizedSolver;
pub use simplex::SimplexSolver;

#[cfg(feature = "highs")]
pub use highs::HighsSolver;

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::problem::Problem;
use crate::error::Result;

/// Two-variable LP solver.
///
/// Implementations are pure functions of the problem snapshot and must be
/// thread-safe (`Send + Sync`) so distinct problems can be solved in parallel.
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Maximise the problem objective subject to its constraints and `x >= 0`.
    ///
    /// # Errors
    ///
    /// Infeasible and unbounded programs are `Ok` outcomes. An error means an
    /// internal fault such as an exhausted pivot budget or a backend failure.
    fn solve(&self, problem: &Problem) -> Result<SolveResult>;
}

/// Outcome of solving one problem snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveResult {
    /// An optimal vertex was found.
    Optimal {
        x1: f64,
        x2: f64,
        /// `c1 * x1 + c2 * x2` at the vertex.
        value: f64,
        /// Simplex pivots performed across both phases.
        iterations: usize,
    },

    /// No point satisfies every constraint together with `x >= 0`.
    Infeasible,

    /// The objective grows without bound over the feasible region.
    Unbounded,
}

impl SolveResult {
    /// Return `true` if an optimal vertex was found.
    #[must_use]
    pub const fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal { .. })
    }

    /// The optimal vertex, if any.
    #[must_use]
    pub const fn point(&self) -> Option<Point> {
        match self {
            Self::Optimal { x1, x2, .. } => Some(Point::new(*x1, *x2)),
            _ => None,
        }
    }

    /// The optimal objective value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Optimal { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Short status message suitable for end users.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Optimal { .. } => "optimal solution found",
            Self::Infeasible => "no feasible solution",
            Self::Unbounded => "objective is unbounded",
        }
    }
}

/// Numerical settings for the simplex solver.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SolverConfig {
    /// Phase 1 optimum above this value means the program is infeasible.
    #[serde(default = "default_feasibility_tolerance")]
    pub feasibility_tolerance: f64,

    /// Entries at or below this magnitude are treated as zero when choosing
    /// pivots.
    #[serde(default = "default_pivot_tolerance")]
    pub pivot_tolerance: f64,

    /// Pivot budget per phase.
    ///
    /// Bland's rule guarantees termination, so this only guards against
    /// numerical breakdown.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Cache results by problem content hash.
    #[serde(default)]
    pub memoize: bool,
}

const fn default_feasibility_tolerance() -> f64 {
    1e-7
}

const fn default_pivot_tolerance() -> f64 {
    1e-9
}

const fn default_max_iterations() -> usize {
    10_000
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            feasibility_tolerance: default_feasibility_tolerance(),
            pivot_tolerance: default_pivot_tolerance(),
            max_iterations: default_max_iterations(),
            memoize: false,
        }
    }
}
