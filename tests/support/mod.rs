#![allow(dead_code)]

pub mod problems;

use planar_lp::domain::Point;

/// Assert two floats agree to within `tol`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

/// Assert two points agree coordinate-wise to within `tol`.
pub fn assert_point(actual: Point, x: f64, y: f64, tol: f64) {
    assert_close(actual.x, x, tol);
    assert_close(actual.y, y, tol);
}
