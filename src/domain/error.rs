//! Domain validation errors for problem construction and geometry inputs.
//!
//! These errors are returned when an edit or an input would violate a domain
//! invariant. A rejected edit leaves the previous state untouched.
//!
//! # Examples
//!
//! ```
//! use planar_lp::domain::error::DomainError;
//! use planar_lp::domain::{Problem, Relation};
//!
//! let mut problem = Problem::default();
//! let result = problem.add_constraint(0.0, 0.0, 4.0, Relation::Le);
//!
//! assert!(matches!(result, Err(DomainError::DegenerateConstraint { .. })));
//! assert!(problem.is_empty());
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Both coefficients are zero, so the constraint has no boundary line.
    #[error("constraint has no variable terms: a1 = {a1}, a2 = {a2}")]
    DegenerateConstraint {
        /// Coefficient of x1.
        a1: f64,
        /// Coefficient of x2.
        a2: f64,
    },

    /// A constraint index does not address an existing row.
    #[error("constraint index {index} out of range for {len} constraints")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of constraints at the time of the request.
        len: usize,
    },

    /// A coefficient, bound or coordinate is `NaN` or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The bounding box must have positive, finite extents.
    #[error("bounding box must have positive extents, got {max_x} x {max_y}")]
    InvalidBoundingBox {
        /// Requested width.
        max_x: f64,
        /// Requested height.
        max_y: f64,
    },

    /// A sampling grid needs at least one sample per axis and a finite range.
    #[error("invalid sampling grid: {reason}")]
    InvalidGrid {
        /// Why the grid was rejected.
        reason: String,
    },
}

/// Reject `NaN` and infinities for the named input.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFiniteValue { field, value })
    }
}
