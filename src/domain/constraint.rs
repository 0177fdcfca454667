//! Linear constraint and objective types for two-variable programs.
//!
//! A [`Constraint`] is `a1 * x1 + a2 * x2 {<=, >=, =} b`. Constructors are
//! fallible: a constraint with no variable terms has no boundary line and is
//! rejected with [`DomainError::DegenerateConstraint`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, DomainError};
use super::geometry::{is_zero_normal, line_in_box, BoundingBox, HalfPlane, Point, Segment};

pub use super::geometry::COEFFICIENT_EPSILON;

/// Constraint relation (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Less than or equal (<=).
    #[serde(rename = "<=", alias = "≤")]
    Le,
    /// Greater than or equal (>=).
    #[serde(rename = ">=", alias = "≥")]
    Ge,
    /// Equal (=).
    #[serde(rename = "=", alias = "==")]
    Eq,
}

impl Relation {
    /// Symbol used in constraint labels.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Le => "≤",
            Self::Ge => "≥",
            Self::Eq => "=",
        }
    }

    /// Relation obtained by multiplying both sides by -1.
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::Le => Self::Ge,
            Self::Ge => Self::Le,
            Self::Eq => Self::Eq,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "≤" => Ok(Self::Le),
            ">=" | "≥" => Ok(Self::Ge),
            "=" | "==" => Ok(Self::Eq),
            other => Err(format!("unknown relation '{other}', expected <=, >= or =")),
        }
    }
}

/// A single linear constraint: `a1 * x1 + a2 * x2 {<=, >=, =} b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constraint {
    a1: f64,
    a2: f64,
    b: f64,
    relation: Relation,
}

impl Constraint {
    /// Create a validated constraint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFiniteValue`] for `NaN`/infinite input and
    /// [`DomainError::DegenerateConstraint`] when both coefficients are zero.
    pub fn new(a1: f64, a2: f64, b: f64, relation: Relation) -> Result<Self, DomainError> {
        ensure_finite("a1", a1)?;
        ensure_finite("a2", a2)?;
        ensure_finite("b", b)?;
        if is_zero_normal(a1, a2) {
            return Err(DomainError::DegenerateConstraint { a1, a2 });
        }
        Ok(Self {
            a1,
            a2,
            b,
            relation,
        })
    }

    /// Create a <= constraint.
    pub fn leq(a1: f64, a2: f64, b: f64) -> Result<Self, DomainError> {
        Self::new(a1, a2, b, Relation::Le)
    }

    /// Create a >= constraint.
    pub fn geq(a1: f64, a2: f64, b: f64) -> Result<Self, DomainError> {
        Self::new(a1, a2, b, Relation::Ge)
    }

    /// Create an = constraint.
    pub fn equal(a1: f64, a2: f64, b: f64) -> Result<Self, DomainError> {
        Self::new(a1, a2, b, Relation::Eq)
    }

    #[must_use]
    pub const fn a1(&self) -> f64 {
        self.a1
    }

    #[must_use]
    pub const fn a2(&self) -> f64 {
        self.a2
    }

    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }

    #[must_use]
    pub const fn relation(&self) -> Relation {
        self.relation
    }

    /// Left-hand side `a1 * x1 + a2 * x2` at `p`.
    #[must_use]
    pub fn lhs(&self, p: Point) -> f64 {
        self.a1 * p.x + self.a2 * p.y
    }

    /// How far `p` is from satisfying the constraint, in left-hand-side units.
    ///
    /// Zero when satisfied.
    #[must_use]
    pub fn violation(&self, p: Point) -> f64 {
        let diff = self.lhs(p) - self.b;
        match self.relation {
            Relation::Le => diff.max(0.0),
            Relation::Ge => (-diff).max(0.0),
            Relation::Eq => diff.abs(),
        }
    }

    #[must_use]
    pub fn is_satisfied(&self, p: Point, tolerance: f64) -> bool {
        self.violation(p) <= tolerance
    }

    /// The constraint as `<=` half-planes: one for `<=`/`>=`, two for `=`.
    #[must_use]
    pub fn half_planes(&self) -> Vec<HalfPlane> {
        // `new` applies the same zero-normal check, so this cannot fail.
        let Ok(le) = HalfPlane::new(self.a1, self.a2, self.b) else {
            return Vec::new();
        };
        match self.relation {
            Relation::Le => vec![le],
            Relation::Ge => vec![le.flipped()],
            Relation::Eq => vec![le, le.flipped()],
        }
    }

    /// The boundary line `a1 * x1 + a2 * x2 = b` clipped to `bbox`.
    #[must_use]
    pub fn boundary_segment(&self, bbox: &BoundingBox) -> Option<Segment> {
        line_in_box(self.a1, self.a2, self.b, bbox, 1e-9)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x1 + {}x2 {} {}",
            self.a1, self.a2, self.relation, self.b
        )
    }
}

#[derive(Deserialize)]
struct RawConstraint {
    a1: f64,
    a2: f64,
    b: f64,
    relation: Relation,
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawConstraint::deserialize(deserializer)?;
        Self::new(raw.a1, raw.a2, raw.b, raw.relation).map_err(serde::de::Error::custom)
    }
}

/// Objective `c1 * x1 + c2 * x2`, always maximised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Objective {
    c1: f64,
    c2: f64,
}

impl Objective {
    /// # Errors
    ///
    /// Returns [`DomainError::NonFiniteValue`] for `NaN`/infinite coefficients.
    pub fn new(c1: f64, c2: f64) -> Result<Self, DomainError> {
        Ok(Self {
            c1: ensure_finite("c1", c1)?,
            c2: ensure_finite("c2", c2)?,
        })
    }

    #[must_use]
    pub const fn c1(&self) -> f64 {
        self.c1
    }

    #[must_use]
    pub const fn c2(&self) -> f64 {
        self.c2
    }

    #[must_use]
    pub fn value_at(&self, p: Point) -> f64 {
        self.c1 * p.x + self.c2 * p.y
    }

    /// The level line `c1 * x1 + c2 * x2 = z` clipped to `bbox`.
    ///
    /// `None` for a zero objective or a level outside the box.
    #[must_use]
    pub fn level_segment(&self, z: f64, bbox: &BoundingBox) -> Option<Segment> {
        if is_zero_normal(self.c1, self.c2) {
            return None;
        }
        line_in_box(self.c1, self.c2, z, bbox, 1e-9)
    }
}

impl Default for Objective {
    fn default() -> Self {
        Self { c1: 3.0, c2: 4.0 }
    }
}

impl<'de> Deserialize<'de> for Objective {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (c1, c2) = <(f64, f64)>::deserialize(deserializer)?;
        Self::new(c1, c2).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate() {
        assert!(matches!(
            Constraint::leq(0.0, 0.0, 1.0),
            Err(DomainError::DegenerateConstraint { .. })
        ));
        assert!(matches!(
            Constraint::leq(1e-13, -1e-13, 1.0),
            Err(DomainError::DegenerateConstraint { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            Constraint::geq(f64::NAN, 1.0, 1.0),
            Err(DomainError::NonFiniteValue { field: "a1", .. })
        ));
        assert!(matches!(
            Objective::new(1.0, f64::INFINITY),
            Err(DomainError::NonFiniteValue { field: "c2", .. })
        ));
    }

    #[test]
    fn test_relation_parses_both_spellings() {
        assert_eq!("<=".parse::<Relation>().unwrap(), Relation::Le);
        assert_eq!("≥".parse::<Relation>().unwrap(), Relation::Ge);
        assert_eq!(" = ".parse::<Relation>().unwrap(), Relation::Eq);
        assert!("<".parse::<Relation>().is_err());
    }

    #[test]
    fn test_label_format() {
        let c = Constraint::leq(2.0, 3.0, 12.0).unwrap();
        assert_eq!(c.to_string(), "2x1 + 3x2 ≤ 12");
    }

    #[test]
    fn test_violation() {
        let c = Constraint::equal(1.0, 1.0, 2.0).unwrap();
        assert_eq!(c.violation(Point::new(1.0, 1.0)), 0.0);
        assert!((c.violation(Point::new(3.0, 0.0)) - 1.0).abs() < 1e-12);

        let ge = Constraint::geq(1.0, 0.0, 2.0).unwrap();
        assert_eq!(ge.violation(Point::new(5.0, 0.0)), 0.0);
        assert!((ge.violation(Point::new(0.5, 0.0)) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_half_planes_for_equality() {
        let c = Constraint::equal(1.0, 0.0, 2.0).unwrap();
        let planes = c.half_planes();
        assert_eq!(planes.len(), 2);
        assert!(planes.iter().all(|h| h.contains(Point::new(2.0, 7.0), 1e-12)));
        assert!(!planes.iter().all(|h| h.contains(Point::new(2.5, 7.0), 1e-12)));
    }

    #[test]
    fn test_smallest_accepted_row_keeps_its_half_plane() {
        let tiny = 2.0 * COEFFICIENT_EPSILON;
        let c = Constraint::leq(tiny, 0.0, tiny).unwrap();
        let planes = c.half_planes();
        assert_eq!(planes.len(), 1);
        assert!((planes[0].normal().x - 1.0).abs() < 1e-12);
        assert!((planes[0].offset() - 1.0).abs() < 1e-9);

        assert!(Constraint::geq(COEFFICIENT_EPSILON / 2.0, 0.0, 1.0).is_err());
        assert!(HalfPlane::new(COEFFICIENT_EPSILON / 2.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Constraint =
            serde_json::from_str(r#"{"a1": 1.0, "a2": 2.0, "b": 3.0, "relation": "≥"}"#).unwrap();
        assert_eq!(ok.relation(), Relation::Ge);

        let err = serde_json::from_str::<Constraint>(
            r#"{"a1": 0.0, "a2": 0.0, "b": 3.0, "relation": "<="}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_level_segment_of_zero_objective() {
        let objective = Objective::new(0.0, 0.0).unwrap();
        assert!(objective.level_segment(1.0, &BoundingBox::default()).is_none());
    }
}
