//! Minimal 2D geometry shared by the transit graph, combinatorial graph,
//! and grid graph. Not a general-purpose geometry kernel: just the handful
//! of operations the octilinearization engine needs (distance, angle,
//! bounding boxes, polyline length).

use serde::{Deserialize, Serialize};

/// A point in the plane, in the transit graph's world coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint of `self` and `other`, used when merging nodes during
    /// short-edge collapse (spec §4.1).
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Angle in radians of the vector from `self` to `other`, in `(-pi, pi]`,
    /// used to build a combinatorial node's cyclic edge ordering (spec §4.2).
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Compute the bounding box of a non-empty set of points.
    ///
    /// # Panics
    /// Panics if `points` is empty.
    pub fn of(points: impl IntoIterator<Item = Point>) -> Self {
        let mut it = points.into_iter();
        let first = it.next().expect("BBox::of requires at least one point");
        let mut min = first;
        let mut max = first;
        for p in it {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow the box by `rad` world units in every direction.
    pub fn padded(&self, rad: f64) -> Self {
        Self {
            min: Point::new(self.min.x - rad, self.min.y - rad),
            max: Point::new(self.max.x + rad, self.max.y + rad),
        }
    }
}

/// Total length of a polyline (sum of consecutive point distances).
pub fn polyline_length(pts: &[Point]) -> f64 {
    pts.windows(2).map(|w| w[0].dist(&w[1])).sum()
}

#[cfg(test)]
#[path = "../unit_tests/geom.rs"]
mod tests;
