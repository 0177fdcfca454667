//! Composed, read-only view of one problem snapshot for renderers.
//!
//! [`QueryService::full_result`] runs the solver and the region engine
//! independently, attaches the objective field and checks that the optimum
//! sits on the region boundary. A mismatch is reported as a
//! [`ConsistencyWarning`]; neither result is ever overridden by the other.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::field::{scalar_field, Grid, ScalarField};
use crate::domain::geometry::{BoundingBox, Point, Segment};
use crate::domain::problem::Problem;
use crate::domain::region::{feasible_region_with_tolerance, Region, DEFAULT_TOLERANCE};
use crate::domain::solver::{SimplexSolver, SolveResult, Solver};
use crate::error::Result;

/// Settings for the cross-component check.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueryConfig {
    /// Largest distance between the optimum and the polygon boundary that
    /// still counts as on the boundary.
    #[serde(default = "default_consistency_tolerance")]
    pub consistency_tolerance: f64,
}

const fn default_consistency_tolerance() -> f64 {
    1e-6
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            consistency_tolerance: default_consistency_tolerance(),
        }
    }
}

/// Disagreement between solver and geometry output. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// The optimum is inside the box but not on the polygon boundary.
    OptimumOffBoundary { x1: f64, x2: f64, distance: f64 },
    /// The optimum lies outside the bounding box, so the polygon cannot show it.
    OptimumOutsideBoundingBox { x1: f64, x2: f64 },
    /// The solver found an optimum but the region inside the box is empty.
    OptimalButRegionEmpty,
    /// The solver reported infeasible but the region has vertices.
    InfeasibleButRegionNonEmpty,
    /// The solver reported unbounded but the region is closed.
    UnboundedButRegionBounded,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptimumOffBoundary { x1, x2, distance } => write!(
                f,
                "optimum ({x1}, {x2}) is {distance:e} away from the region boundary"
            ),
            Self::OptimumOutsideBoundingBox { x1, x2 } => {
                write!(f, "optimum ({x1}, {x2}) lies outside the bounding box")
            }
            Self::OptimalButRegionEmpty => {
                f.write_str("solver found an optimum but the region is empty")
            }
            Self::InfeasibleButRegionNonEmpty => {
                f.write_str("solver reported infeasible but the region is non-empty")
            }
            Self::UnboundedButRegionBounded => {
                f.write_str("solver reported unbounded but the region is bounded")
            }
        }
    }
}

/// Boundary line of one constraint, in insertion order, for labeling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintBoundary {
    pub index: usize,
    pub label: String,
    /// `None` when the line misses the bounding box.
    pub segment: Option<Segment>,
}

/// Everything a renderer needs for one `(problem, bbox)` pair.
#[derive(Debug, Clone)]
pub struct FullResult {
    solve: SolveResult,
    region: Region,
    field: ScalarField,
    boundaries: Vec<ConstraintBoundary>,
    optimum_level: Option<Segment>,
    warnings: Vec<ConsistencyWarning>,
}

impl FullResult {
    #[must_use]
    pub const fn solve(&self) -> &SolveResult {
        &self.solve
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// A fresh cursor over the objective field.
    #[must_use]
    pub fn field(&self) -> ScalarField {
        self.field.restart()
    }

    #[must_use]
    pub fn boundaries(&self) -> &[ConstraintBoundary] {
        &self.boundaries
    }

    /// The objective level line through the optimum, clipped to the box.
    #[must_use]
    pub const fn optimum_level(&self) -> Option<Segment> {
        self.optimum_level
    }

    #[must_use]
    pub fn warnings(&self) -> &[ConsistencyWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Runs the solver and the region engine and composes their output.
#[derive(Clone)]
pub struct QueryService {
    solver: Arc<dyn Solver>,
    config: QueryConfig,
    region_tolerance: f64,
    nx: usize,
    ny: usize,
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new(Arc::new(SimplexSolver::default()))
    }
}

impl QueryService {
    #[must_use]
    pub fn new(solver: Arc<dyn Solver>) -> Self {
        Self {
            solver,
            config: QueryConfig::default(),
            region_tolerance: DEFAULT_TOLERANCE,
            nx: 400,
            ny: 400,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn with_region_tolerance(mut self, tolerance: f64) -> Self {
        self.region_tolerance = tolerance;
        self
    }

    /// Set the field sampling resolution.
    #[must_use]
    pub const fn with_grid(mut self, nx: usize, ny: usize) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    #[must_use]
    pub fn solver(&self) -> &dyn Solver {
        self.solver.as_ref()
    }

    /// # Errors
    ///
    /// Propagates internal solver faults.
    pub fn solve(&self, problem: &Problem) -> Result<SolveResult> {
        self.solver.solve(problem)
    }

    #[must_use]
    pub fn feasible_region(&self, problem: &Problem, bbox: &BoundingBox) -> Region {
        feasible_region_with_tolerance(problem, bbox, self.region_tolerance)
    }

    /// Solve, compute the region and sample the field for one snapshot.
    ///
    /// # Errors
    ///
    /// Propagates internal solver faults and an invalid sampling grid.
    pub fn full_result(&self, problem: &Problem, bbox: &BoundingBox) -> Result<FullResult> {
        let solve = self.solve(problem)?;
        let region = self.feasible_region(problem, bbox);
        let grid = Grid::over(bbox, self.nx, self.ny)?;
        let field = scalar_field(problem.objective(), grid);

        let boundaries = problem
            .constraints()
            .iter()
            .enumerate()
            .map(|(index, c)| ConstraintBoundary {
                index,
                label: c.to_string(),
                segment: c.boundary_segment(bbox),
            })
            .collect();

        let optimum_level = solve
            .value()
            .and_then(|z| problem.objective().level_segment(z, bbox));

        let warnings = check_consistency(&solve, &region, bbox, self.config.consistency_tolerance);
        for warning in &warnings {
            warn!(solver = self.solver.name(), %warning, "solver and region disagree");
        }
        debug!(
            solver = self.solver.name(),
            status = solve.message(),
            constraints = problem.len(),
            warnings = warnings.len(),
            "composed full result"
        );

        Ok(FullResult {
            solve,
            region,
            field,
            boundaries,
            optimum_level,
            warnings,
        })
    }
}

/// [`QueryService::full_result`] with the default simplex solver.
///
/// # Errors
///
/// Propagates internal solver faults.
pub fn full_result(problem: &Problem, bbox: &BoundingBox) -> Result<FullResult> {
    QueryService::default().full_result(problem, bbox)
}

/// Check that an optimum lies on the region boundary and that the solver
/// status agrees with the region classification.
#[must_use]
pub fn check_consistency(
    solve: &SolveResult,
    region: &Region,
    bbox: &BoundingBox,
    tolerance: f64,
) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();
    match (solve, region.polygon()) {
        (SolveResult::Optimal { x1, x2, .. }, polygon) => {
            let point = Point::new(*x1, *x2);
            if !bbox.contains(point, tolerance) {
                warnings.push(ConsistencyWarning::OptimumOutsideBoundingBox { x1: *x1, x2: *x2 });
            } else if let Some(polygon) = polygon {
                let distance = polygon.distance_to_boundary(point);
                if distance > tolerance {
                    warnings.push(ConsistencyWarning::OptimumOffBoundary {
                        x1: *x1,
                        x2: *x2,
                        distance,
                    });
                }
            } else {
                warnings.push(ConsistencyWarning::OptimalButRegionEmpty);
            }
        }
        (SolveResult::Infeasible, Some(_)) => {
            warnings.push(ConsistencyWarning::InfeasibleButRegionNonEmpty);
        }
        (SolveResult::Unbounded, Some(_)) if region.is_bounded() => {
            warnings.push(ConsistencyWarning::UnboundedButRegionBounded);
        }
        _ => {}
    }
    warnings
}
