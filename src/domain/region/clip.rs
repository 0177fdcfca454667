//! Sutherland–Hodgman clipping of a convex polygon against one half-plane,
//! and vertex cleanup.

use crate::domain::geometry::{HalfPlane, Point};

/// Clip `polygon` against `plane`, keeping the part with
/// `signed_distance <= tolerance`.
///
/// Walks the edges in order, keeps inside vertices and inserts the
/// boundary crossing of every edge that changes side. Orientation is
/// preserved. Handles degenerate inputs (a point or a segment).
#[must_use]
pub fn clip(polygon: &[Point], plane: &HalfPlane, tolerance: f64) -> Vec<Point> {
    let n = polygon.len();
    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let cur = polygon[i];
        let next = polygon[(i + 1) % n];
        let d_cur = plane.signed_distance(cur);
        let d_next = plane.signed_distance(next);
        let cur_in = d_cur <= tolerance;
        let next_in = d_next <= tolerance;

        if cur_in {
            out.push(cur);
        }
        if cur_in != next_in {
            let t = (d_cur / (d_cur - d_next)).clamp(0.0, 1.0);
            out.push(cur.lerp(next, t));
        }
    }
    out
}

/// Remove duplicate and collinear vertices, orient counterclockwise and
/// start at the lowest (then leftmost) vertex.
///
/// A collinear vertex list collapses to its two extreme points (or one).
#[must_use]
pub fn simplify(vertices: Vec<Point>, tolerance: f64) -> Vec<Point> {
    let mut pts = dedup_cyclic(vertices, tolerance);

    if pts.len() >= 3 {
        if let Some(extremes) = collapse_collinear(&pts, tolerance) {
            pts = extremes;
        } else {
            pts = drop_straight_vertices(pts, tolerance);
            if signed_area(&pts) < 0.0 {
                pts.reverse();
            }
        }
    }

    if let Some(start) = pts
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
    {
        pts.rotate_left(start);
    }
    pts
}

/// Twice the signed area; positive for counterclockwise order.
#[must_use]
pub fn signed_area(pts: &[Point]) -> f64 {
    let n = pts.len();
    (0..n)
        .map(|i| {
            let (a, b) = (pts[i], pts[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn dedup_cyclic(vertices: Vec<Point>, tolerance: f64) -> Vec<Point> {
    let mut pts: Vec<Point> = Vec::with_capacity(vertices.len());
    for p in vertices {
        if pts.last().map_or(true, |q| !q.approx_eq(p, tolerance)) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts[0].approx_eq(pts[pts.len() - 1], tolerance) {
        pts.pop();
    }
    pts
}

/// The two farthest-apart points if every point lies on their line.
fn collapse_collinear(pts: &[Point], tolerance: f64) -> Option<Vec<Point>> {
    let mut best = (pts[0], pts[0], 0.0);
    for (i, &p) in pts.iter().enumerate() {
        for &q in &pts[i + 1..] {
            let d = p.distance(q);
            if d > best.2 {
                best = (p, q, d);
            }
        }
    }
    let (a, b, len) = best;
    if len <= tolerance {
        return Some(vec![a]);
    }
    let on_line = pts
        .iter()
        .all(|&p| (a.cross(b, p) / len).abs() <= tolerance);
    on_line.then(|| vec![a, b])
}

/// Drop vertices where the boundary continues straight on.
fn drop_straight_vertices(mut pts: Vec<Point>, tolerance: f64) -> Vec<Point> {
    let mut changed = true;
    while changed && pts.len() > 3 {
        changed = false;
        let n = pts.len();
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let cur = pts[i];
            let next = pts[(i + 1) % n];
            let span = prev.distance(next);
            if span <= tolerance {
                continue;
            }
            let off_line = (prev.cross(next, cur) / span).abs();
            let forward =
                (cur.x - prev.x) * (next.x - cur.x) + (cur.y - prev.y) * (next.y - cur.y) >= 0.0;
            if off_line <= tolerance && forward {
                pts.remove(i);
                changed = true;
                break;
            }
        }
    }
    pts
}
