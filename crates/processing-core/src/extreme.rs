//! Axis-extreme points of a convex hull.

use gerbil_model::{ConvexHull, ExtremePoints, Point2D};

/// Find the topmost, rightmost, bottommost and leftmost hull vertices.
///
/// Each axis is scanned independently over all vertices. On ties the
/// first vertex in hull order wins. Returns `None` for an empty hull.
pub fn extreme_points(hull: &ConvexHull) -> Option<ExtremePoints> {
    let first = *hull.points.first()?;

    let mut extremes = ExtremePoints {
        top: first,
        right: first,
        bottom: first,
        left: first,
    };

    // Strict comparisons keep the earliest vertex on ties.
    for &point in &hull.points[1..] {
        if point.y < extremes.top.y {
            extremes.top = point;
        }
        if point.y > extremes.bottom.y {
            extremes.bottom = point;
        }
        if point.x < extremes.left.x {
            extremes.left = point;
        }
        if point.x > extremes.right.x {
            extremes.right = point;
        }
    }

    Some(extremes)
}

/// The tracked pointer: the topmost hull vertex, usually a fingertip.
pub fn pointer_point(extremes: &ExtremePoints) -> Point2D {
    extremes.top
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hull(points: &[(i32, i32)]) -> ConvexHull {
        ConvexHull::new(points.iter().map(|&(x, y)| Point2D::new(x, y)).collect())
    }

    #[test]
    fn test_diamond() {
        let extremes = extreme_points(&hull(&[(50, 0), (100, 50), (50, 100), (0, 50)])).unwrap();
        assert_eq!(extremes.top, Point2D::new(50, 0));
        assert_eq!(extremes.right, Point2D::new(100, 50));
        assert_eq!(extremes.bottom, Point2D::new(50, 100));
        assert_eq!(extremes.left, Point2D::new(0, 50));
    }

    #[test]
    fn test_single_point_is_every_extreme() {
        let extremes = extreme_points(&hull(&[(7, 9)])).unwrap();
        assert_eq!(extremes.top, extremes.bottom);
        assert_eq!(extremes.left, extremes.right);
        assert_eq!(extremes.top, Point2D::new(7, 9));
    }

    #[test]
    fn test_ties_keep_first_vertex() {
        // Square: two vertices share each extreme coordinate.
        let extremes = extreme_points(&hull(&[(10, 10), (90, 10), (90, 90), (10, 90)])).unwrap();
        assert_eq!(extremes.top, Point2D::new(10, 10));
        assert_eq!(extremes.right, Point2D::new(90, 10));
        assert_eq!(extremes.bottom, Point2D::new(90, 90));
        assert_eq!(extremes.left, Point2D::new(10, 10));
    }

    #[test]
    fn test_empty_hull() {
        assert!(extreme_points(&ConvexHull::default()).is_none());
    }

    #[test]
    fn test_pointer_is_topmost() {
        let extremes = extreme_points(&hull(&[(0, 40), (30, 5), (60, 40)])).unwrap();
        assert_eq!(pointer_point(&extremes), Point2D::new(30, 5));
    }

    proptest! {
        #[test]
        fn prop_extremes_are_hull_members_and_bound_it(
            raw in proptest::collection::vec((-500i32..500, -500i32..500), 1..40)
        ) {
            let hull = hull(&raw);
            let e = extreme_points(&hull).unwrap();

            for p in [e.top, e.right, e.bottom, e.left] {
                prop_assert!(hull.points.contains(&p));
            }
            for p in &hull.points {
                prop_assert!(e.top.y <= p.y);
                prop_assert!(e.bottom.y >= p.y);
                prop_assert!(e.left.x <= p.x);
                prop_assert!(e.right.x >= p.x);
            }
        }
    }
}
