//! Objective scalar field over a rectangular sample grid, for contour data.

use serde::{Deserialize, Serialize};

use super::constraint::Objective;
use super::error::{ensure_finite, DomainError};
use super::geometry::BoundingBox;

/// Evenly spaced `nx x ny` samples over `[x_min, x_max] x [y_min, y_max]`,
/// endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grid {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    nx: usize,
    ny: usize,
}

impl Grid {
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidGrid`] for an empty axis or a reversed
    /// range, and [`DomainError::NonFiniteValue`] for non-finite bounds.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        nx: usize,
        ny: usize,
    ) -> Result<Self, DomainError> {
        ensure_finite("x_min", x_min)?;
        ensure_finite("x_max", x_max)?;
        ensure_finite("y_min", y_min)?;
        ensure_finite("y_max", y_max)?;
        if nx == 0 || ny == 0 {
            return Err(DomainError::InvalidGrid {
                reason: format!("need at least one sample per axis, got {nx} x {ny}"),
            });
        }
        if x_max < x_min || y_max < y_min {
            return Err(DomainError::InvalidGrid {
                reason: format!("reversed range [{x_min}, {x_max}] x [{y_min}, {y_max}]"),
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            nx,
            ny,
        })
    }

    /// Grid covering a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidGrid`] when either count is zero.
    pub fn over(bbox: &BoundingBox, nx: usize, ny: usize) -> Result<Self, DomainError> {
        Self::new(0.0, bbox.max_x(), 0.0, bbox.max_y(), nx, ny)
    }

    #[must_use]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    #[must_use]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Always `false`; a grid has at least one sample.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn x_at(&self, i: usize) -> f64 {
        linspace_at(self.x_min, self.x_max, self.nx, i)
    }

    #[must_use]
    pub fn y_at(&self, j: usize) -> f64 {
        linspace_at(self.y_min, self.y_max, self.ny, j)
    }
}

#[derive(Deserialize)]
struct RawGrid {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    nx: usize,
    ny: usize,
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawGrid::deserialize(deserializer)?;
        Self::new(raw.x_min, raw.x_max, raw.y_min, raw.y_max, raw.nx, raw.ny)
            .map_err(serde::de::Error::custom)
    }
}

fn linspace_at(lo: f64, hi: f64, n: usize, i: usize) -> f64 {
    if n == 1 {
        return lo;
    }
    if i + 1 == n {
        return hi;
    }
    lo + (hi - lo) * (i as f64) / ((n - 1) as f64)
}

/// One sample of the objective field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Lazy, finite, restartable sequence of `(x1, x2, z)` samples.
///
/// Samples run row by row: all `x` for the first `y`, then the next `y`.
/// Cloning yields an independent cursor; [`ScalarField::restart`] rewinds.
#[derive(Debug, Clone)]
pub struct ScalarField {
    objective: Objective,
    grid: Grid,
    next: usize,
}

/// Sample `objective` over `grid`.
#[must_use]
pub fn scalar_field(objective: Objective, grid: Grid) -> ScalarField {
    ScalarField {
        objective,
        grid,
        next: 0,
    }
}

impl ScalarField {
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn objective(&self) -> Objective {
        self.objective
    }

    /// A fresh cursor from the first sample.
    #[must_use]
    pub fn restart(&self) -> Self {
        scalar_field(self.objective, self.grid)
    }

    /// Sample at column `i`, row `j`.
    #[must_use]
    pub fn sample(&self, i: usize, j: usize) -> FieldSample {
        let x = self.grid.x_at(i);
        let y = self.grid.y_at(j);
        FieldSample {
            x,
            y,
            z: self.objective.c1() * x + self.objective.c2() * y,
        }
    }

    /// Minimum and maximum of `z` over the grid.
    ///
    /// The field is linear, so the extremes sit at the grid corners.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        let (last_i, last_j) = (self.grid.nx - 1, self.grid.ny - 1);
        [(0, 0), (last_i, 0), (0, last_j), (last_i, last_j)]
            .into_iter()
            .map(|(i, j)| self.sample(i, j).z)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| {
                (lo.min(z), hi.max(z))
            })
    }

    /// `count` evenly spaced contour levels strictly between the field
    /// minimum and maximum. Empty for a constant field.
    #[must_use]
    pub fn levels(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.range();
        if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
            return Vec::new();
        }
        let step = (hi - lo) / (count as f64 + 1.0);
        (1..=count).map(|k| lo + step * k as f64).collect()
    }

    /// The field as `z[j][i]`, the layout contour renderers expect.
    #[must_use]
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        (0..self.grid.ny)
            .map(|j| (0..self.grid.nx).map(|i| self.sample(i, j).z).collect())
            .collect()
    }
}

impl Iterator for ScalarField {
    type Item = FieldSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.grid.len() {
            return None;
        }
        let (i, j) = (self.next % self.grid.nx, self.next / self.grid.nx);
        self.next += 1;
        Some(self.sample(i, j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScalarField {}
