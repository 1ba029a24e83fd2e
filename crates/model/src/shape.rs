//! Silhouette outlines produced by the vision stage.

use crate::geometry::Point2D;

/// Closed outline of a detected shape, in frame space.
///
/// The last point connects back to the first. An empty boundary means
/// nothing was detected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Boundary {
    pub points: Vec<Point2D>,
}

impl Boundary {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Enclosed area using the shoelace formula.
    ///
    /// Orientation does not matter; fewer than three points enclose nothing.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

/// Convex envelope of a boundary, as an ordered subset of its vertices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvexHull {
    pub points: Vec<Point2D>,
}

impl ConvexHull {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

fn polygon_area(points: &[Point2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area: i64 = 0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        twice_area += i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y);
    }

    twice_area.abs() as f64 / 2.0
}
