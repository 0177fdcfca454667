//! Feasible-region geometry by half-plane intersection.
//!
//! The region starts as the bounding rectangle `[0, max_x] x [0, max_y]`,
//! which already encodes `x1, x2 >= 0`, and is clipped against every
//! constraint in insertion order (`=` rows clip twice). The result is
//! classified as:
//!
//! - [`Region::Bounded`]: the clipped polygon is the whole feasible region;
//! - [`Region::Unbounded`]: the polygon reaches the far sides of the box and
//!   the constraints admit a recession direction, so the box cut it;
//! - [`Region::Empty`]: nothing survives inside the box.

mod clip;

pub use clip::{clip, signed_area, simplify};

use serde::Serialize;
use tracing::debug;

use super::geometry::{BoundingBox, HalfPlane, Point, Segment};
use super::problem::Problem;

/// Vertex coincidence tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Counterclockwise boundary of a convex region.
///
/// Fewer than three vertices means the region degenerated to a segment or
/// a point (`=` constraints do this).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build from an arbitrary vertex walk, cleaning and orienting it.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Point>, tolerance: f64) -> Self {
        Self {
            vertices: simplify(vertices, tolerance),
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the polygon has collapsed to a segment or a point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs() / 2.0
    }

    /// Boundary edges in order. A segment polygon yields its segment once;
    /// a point yields a zero-length segment.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        let count = match n {
            0 => 0,
            1 | 2 => 1,
            _ => n,
        };
        (0..count).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Distance from `p` to the nearest boundary point.
    #[must_use]
    pub fn distance_to_boundary(&self, p: Point) -> f64 {
        self.edges()
            .map(|e| e.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether `p` is inside or on the boundary.
    #[must_use]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        if self.is_degenerate() {
            return self.distance_to_boundary(p) <= tolerance;
        }
        self.edges().all(|e| {
            let len = e.start.distance(e.end);
            e.start.cross(e.end, p) >= -tolerance * len
        })
    }
}

/// The feasible region as seen through a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Region {
    /// The polygon is the entire feasible region.
    Bounded { polygon: Polygon },

    /// The feasible region continues past the box along `direction`;
    /// `polygon` is its part inside the box.
    Unbounded { polygon: Polygon, direction: Point },

    /// No feasible point inside the box.
    Empty,
}

impl Region {
    /// The polygon to draw, if any.
    #[must_use]
    pub const fn polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Bounded { polygon } | Self::Unbounded { polygon, .. } => Some(polygon),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded { .. })
    }

    /// Recession direction for unbounded regions.
    #[must_use]
    pub const fn direction(&self) -> Option<Point> {
        match self {
            Self::Unbounded { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}

/// Compute the feasible region of `problem` inside `bbox`.
#[must_use]
pub fn feasible_region(problem: &Problem, bbox: &BoundingBox) -> Region {
    feasible_region_with_tolerance(problem, bbox, DEFAULT_TOLERANCE)
}

/// [`feasible_region`] with an explicit coincidence tolerance.
#[must_use]
pub fn feasible_region_with_tolerance(
    problem: &Problem,
    bbox: &BoundingBox,
    tolerance: f64,
) -> Region {
    let planes: Vec<HalfPlane> = problem
        .constraints()
        .iter()
        .flat_map(|c| c.half_planes())
        .collect();

    let mut vertices = bbox.corners().to_vec();
    for plane in &planes {
        vertices = clip(&vertices, plane, tolerance);
        if vertices.is_empty() {
            break;
        }
    }

    let polygon = Polygon::from_vertices(vertices, tolerance);
    if polygon.is_empty() {
        if recession_direction(&planes, tolerance).is_some() {
            debug!("feasible region may lie entirely outside the bounding box");
        }
        return Region::Empty;
    }

    let touches_far_side = polygon
        .vertices()
        .iter()
        .any(|&p| bbox.on_far_side(p, tolerance));

    if touches_far_side {
        if let Some(direction) = recession_direction(&planes, tolerance) {
            debug!(
                vertices = polygon.len(),
                dx = direction.x,
                dy = direction.y,
                "feasible region is unbounded"
            );
            return Region::Unbounded { polygon, direction };
        }
    }

    debug!(vertices = polygon.len(), "feasible region is bounded");
    Region::Bounded { polygon }
}

/// A unit direction `d >= 0` with `n . d <= 0` for every half-plane.
///
/// In two dimensions the recession cone of the quadrant-restricted region
/// is spanned by rays along the axes or along constraint boundaries, so
/// testing those candidates is exhaustive.
#[must_use]
pub fn recession_direction(planes: &[HalfPlane], tolerance: f64) -> Option<Point> {
    let axis = [Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    let along_boundaries = planes.iter().flat_map(|h| {
        let n = h.normal();
        [Point::new(-n.y, n.x), Point::new(n.y, -n.x)]
    });

    axis.into_iter()
        .chain(along_boundaries)
        .filter(|d| d.x >= -tolerance && d.y >= -tolerance)
        .map(|d| Point::new(d.x.max(0.0) + 0.0, d.y.max(0.0) + 0.0))
        .filter(|d| d.x > tolerance || d.y > tolerance)
        .find(|&d| planes.iter().all(|h| h.admits_direction(d, tolerance)))
}
