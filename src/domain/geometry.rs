//! Planar primitives shared by the region engine, the field sampler and the
//! constraint model.

use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, DomainError};

/// Coefficients this close to zero count as zero.
pub const COEFFICIENT_EPSILON: f64 = 1e-12;

/// Whether `(a1, a2)` is the zero vector within [`COEFFICIENT_EPSILON`].
#[must_use]
pub fn is_zero_normal(a1: f64, a2: f64) -> bool {
    a1.abs() <= COEFFICIENT_EPSILON && a2.abs() <= COEFFICIENT_EPSILON
}

/// A point (or direction) in the `(x1, x2)` plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at parameter `t` along the segment from `self` to `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Z component of `(a - self) x (b - self)`.
    #[must_use]
    pub fn cross(self, a: Self, b: Self) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }

    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// The finite window `[0, max_x] x [0, max_y]` used to close the feasible region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    max_x: f64,
    max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box with positive, finite extents.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBoundingBox`] for non-positive or
    /// non-finite extents.
    pub fn new(max_x: f64, max_y: f64) -> Result<Self, DomainError> {
        if !(max_x.is_finite() && max_y.is_finite() && max_x > 0.0 && max_y > 0.0) {
            return Err(DomainError::InvalidBoundingBox { max_x, max_y });
        }
        Ok(Self { max_x, max_y })
    }

    #[must_use]
    pub const fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub const fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Corners in counterclockwise order starting at the origin.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.max_x, 0.0),
            Point::new(self.max_x, self.max_y),
            Point::new(0.0, self.max_y),
        ]
    }

    #[must_use]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= -tolerance
            && p.y >= -tolerance
            && p.x <= self.max_x + tolerance
            && p.y <= self.max_y + tolerance
    }

    /// Whether `p` lies on the right (`x = max_x`) or top (`y = max_y`) side.
    ///
    /// Sides on the axes are part of the non-negative quadrant and never
    /// count as far sides.
    #[must_use]
    pub fn on_far_side(&self, p: Point, tolerance: f64) -> bool {
        (p.x - self.max_x).abs() <= tolerance || (p.y - self.max_y).abs() <= tolerance
    }
}

#[derive(Deserialize)]
struct RawBoundingBox {
    max_x: f64,
    max_y: f64,
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBoundingBox::deserialize(deserializer)?;
        Self::new(raw.max_x, raw.max_y).map_err(serde::de::Error::custom)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            max_x: 10.0,
            max_y: 10.0,
        }
    }
}

/// A closed line segment, possibly degenerate (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean distance from `p` to the closest point of the segment.
    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.start.distance(p);
        }
        let t = (((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.start.lerp(self.end, t).distance(p)
    }
}

/// Closed half-plane `normal . p <= offset` with a unit-length normal.
///
/// Normalising at construction makes [`HalfPlane::signed_distance`] a true
/// Euclidean distance, so one tolerance works for every constraint scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HalfPlane {
    normal: Point,
    offset: f64,
}

impl HalfPlane {
    /// Half-plane `a1 * x + a2 * y <= b`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DegenerateConstraint`] when `(a1, a2)` is the
    /// zero vector and [`DomainError::NonFiniteValue`] for non-finite input.
    pub fn new(a1: f64, a2: f64, b: f64) -> Result<Self, DomainError> {
        ensure_finite("a1", a1)?;
        ensure_finite("a2", a2)?;
        ensure_finite("b", b)?;
        if is_zero_normal(a1, a2) {
            return Err(DomainError::DegenerateConstraint { a1, a2 });
        }
        let norm = a1.hypot(a2);
        Ok(Self {
            normal: Point::new(a1 / norm, a2 / norm),
            offset: b / norm,
        })
    }

    #[must_use]
    pub const fn normal(&self) -> Point {
        self.normal
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Positive outside, negative inside, zero on the boundary line.
    #[must_use]
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.normal.x * p.x + self.normal.y * p.y - self.offset
    }

    #[must_use]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        self.signed_distance(p) <= tolerance
    }

    /// Whether direction `d` keeps every point inside when added to it.
    #[must_use]
    pub fn admits_direction(&self, d: Point, tolerance: f64) -> bool {
        self.normal.x * d.x + self.normal.y * d.y <= tolerance
    }

    /// Same boundary line, opposite side.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: Point::new(-self.normal.x, -self.normal.y),
            offset: -self.offset,
        }
    }
}

/// The part of the line `a1 * x + a2 * y = b` inside `bbox`.
///
/// Works for vertical and horizontal lines alike. Returns `None` when the
/// line misses the box, and a degenerate segment when it only touches a corner.
#[must_use]
pub fn line_in_box(a1: f64, a2: f64, b: f64, bbox: &BoundingBox, tolerance: f64) -> Option<Segment> {
    let (mx, my) = (bbox.max_x(), bbox.max_y());
    let mut hits: Vec<Point> = Vec::with_capacity(4);

    if a2.abs() > f64::EPSILON {
        hits.push(Point::new(0.0, b / a2));
        hits.push(Point::new(mx, (b - a1 * mx) / a2));
    }
    if a1.abs() > f64::EPSILON {
        hits.push(Point::new(b / a1, 0.0));
        hits.push(Point::new((b - a2 * my) / a1, my));
    }

    let mut inside: Vec<Point> = Vec::with_capacity(4);
    for p in hits.into_iter().filter(|p| bbox.contains(*p, tolerance)) {
        if !inside.iter().any(|q| q.approx_eq(p, tolerance)) {
            inside.push(p);
        }
    }

    let first = *inside.first()?;
    let mut best = Segment::new(first, first);
    let mut best_len = 0.0;
    for (i, &p) in inside.iter().enumerate() {
        for &q in &inside[i + 1..] {
            let len = p.distance(q);
            if len > best_len {
                best_len = len;
                best = Segment::new(p, q);
            }
        }
    }
    Some(best)
}
