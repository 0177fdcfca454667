//! Planar LP - two-variable linear programs and their feasible regions.
//!
//! Solves `maximize c1*x1 + c2*x2` subject to two-variable linear
//! constraints and the implicit bounds `x1 >= 0, x2 >= 0`, and computes the
//! geometry a renderer needs: the feasible polygon clipped to a bounding
//! box, each constraint's boundary segment and the objective's scalar field.
//!
//! # Modules
//!
//! - [`domain`] - Problem model, solver port, region engine and scalar field
//! - [`domain::solver`] - Solver trait, two-phase simplex, memoization
//!   and an optional HiGHS backend (`highs` feature)
//! - [`service`] - Query service composing solve, region and field results
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line shell over problem files
//!
//! # Example
//!
//! ```
//! use planar_lp::domain::{BoundingBox, Objective, Problem, Relation};
//! use planar_lp::service::QueryService;
//!
//! let mut problem = Problem::new(Objective::new(3.0, 4.0).unwrap());
//! problem.add_constraint(1.0, 1.0, 4.0, Relation::Le).unwrap();
//!
//! let result = QueryService::default()
//!     .full_result(&problem, &BoundingBox::default())
//!     .unwrap();
//! assert_eq!(result.solve().value(), Some(16.0));
//! assert!(result.is_consistent());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
