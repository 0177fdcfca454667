//! The two-variable program: an objective plus an ordered constraint list.
//!
//! Non-negativity of `x1` and `x2` is implicit. It is never stored as a
//! constraint here; the solver and the region engine apply it themselves.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::constraint::{Constraint, Objective, Relation};
use super::error::DomainError;
use super::geometry::Point;

/// Maximise `objective` subject to `constraints` and `x1, x2 >= 0`.
///
/// Insertion order of constraints is preserved and only affects labeling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    objective: Objective,
    #[serde(default)]
    constraints: Vec<Constraint>,
}

impl Problem {
    #[must_use]
    pub const fn new(objective: Objective) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }

    /// Build a problem from already validated constraints.
    #[must_use]
    pub fn with_constraints(objective: Objective, constraints: Vec<Constraint>) -> Self {
        Self {
            objective,
            constraints,
        }
    }

    #[must_use]
    pub const fn objective(&self) -> Objective {
        self.objective
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Append `a1 * x1 + a2 * x2 {relation} b` and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DegenerateConstraint`] when both coefficients
    /// are zero; the problem is left unchanged.
    pub fn add_constraint(
        &mut self,
        a1: f64,
        a2: f64,
        b: f64,
        relation: Relation,
    ) -> Result<usize, DomainError> {
        let constraint = Constraint::new(a1, a2, b, relation)?;
        self.push(constraint);
        Ok(self.constraints.len() - 1)
    }

    /// Append an already validated constraint and return its index.
    pub fn push(&mut self, constraint: Constraint) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    /// Remove and return the constraint at `index`, shifting later rows down.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] for an invalid index.
    pub fn remove_constraint(&mut self, index: usize) -> Result<Constraint, DomainError> {
        self.check_index(index)?;
        Ok(self.constraints.remove(index))
    }

    /// Replace the constraint at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] for an invalid index.
    pub fn replace_constraint(
        &mut self,
        index: usize,
        constraint: Constraint,
    ) -> Result<Constraint, DomainError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.constraints[index], constraint))
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index < self.constraints.len() {
            Ok(())
        } else {
            Err(DomainError::IndexOutOfRange {
                index,
                len: self.constraints.len(),
            })
        }
    }

    /// Whether `p` is non-negative and satisfies every constraint.
    #[must_use]
    pub fn is_feasible(&self, p: Point, tolerance: f64) -> bool {
        p.x >= -tolerance
            && p.y >= -tolerance
            && self.constraints.iter().all(|c| c.is_satisfied(p, tolerance))
    }

    /// Bit-exact hash of the objective and the constraint list.
    ///
    /// Equal problems hash equally; `-0.0` and `0.0` hash differently, which
    /// only costs a cache miss.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.objective.c1().to_bits().hash(&mut hasher);
        self.objective.c2().to_bits().hash(&mut hasher);
        self.constraints.len().hash(&mut hasher);
        for c in &self.constraints {
            c.a1().to_bits().hash(&mut hasher);
            c.a2().to_bits().hash(&mut hasher);
            c.b().to_bits().hash(&mut hasher);
            c.relation().hash(&mut hasher);
        }
        hasher.finish()
    }
}
