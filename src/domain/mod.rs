//! Pure problem model, solver port and geometry.

pub mod constraint;
pub mod error;
pub mod field;
pub mod geometry;
pub mod problem;
pub mod region;
pub mod solver;

pub use constraint::{Constraint, Objective, Relation};
pub use error::DomainError;
pub use field::{scalar_field, FieldSample, Grid, ScalarField};
pub use geometry::{BoundingBox, HalfPlane, Point, Segment};
pub use problem::Problem;
pub use region::{feasible_region, Polygon, Region};
pub use solver::{SimplexSolver, SolveResult, Solver, SolverConfig};
