//! Cursor motion smoothing.
//!
//! Each frame the cursor covers a fraction of the remaining distance to the
//! mapped target. The fraction shrinks with distance, and targets inside the
//! dead zone leave the cursor where it is.

use gerbil_model::{CursorState, Point2D};

/// One distance band of the smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBand {
    /// The band applies when the distance is strictly greater than this.
    pub min_distance: f64,
    /// The cursor moves `delta / divisor`, truncated toward zero.
    pub divisor: i32,
}

/// Bands in evaluation order; below the last one is the dead zone.
pub const DEFAULT_BANDS: [SpeedBand; 3] = [
    SpeedBand {
        min_distance: 2000.0,
        divisor: 2,
    },
    SpeedBand {
        min_distance: 1500.0,
        divisor: 4,
    },
    SpeedBand {
        min_distance: 800.0,
        divisor: 8,
    },
];

/// Distance-banded cursor smoother.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    bands: Vec<SpeedBand>,
}

impl CursorSmoother {
    /// Create a smoother from bands ordered by descending `min_distance`.
    pub fn new(bands: Vec<SpeedBand>) -> Self {
        debug_assert!(
            bands
                .windows(2)
                .all(|w| w[0].min_distance > w[1].min_distance),
            "bands must be ordered by descending distance"
        );
        debug_assert!(bands.iter().all(|b| b.divisor > 0));
        Self { bands }
    }

    /// Radius of the dead zone: targets at or below it never move the cursor.
    pub fn dead_zone(&self) -> f64 {
        self.bands.last().map(|b| b.min_distance).unwrap_or(0.0)
    }

    /// Next cursor position given the current one and the mapped target.
    pub fn smooth(&self, current: CursorState, target: Point2D) -> CursorState {
        let origin = current.as_point();
        let dx = target.x - origin.x;
        let dy = target.y - origin.y;
        let distance = origin.distance_to(&target);

        match self.bands.iter().find(|band| distance > band.min_distance) {
            Some(band) => CursorState::from_point(Point2D::new(
                origin.x + dx / band.divisor,
                origin.y + dy / band.divisor,
            )),
            None => current,
        }
    }
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_BANDS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn smooth(cx: u16, cy: u16, tx: i32, ty: i32) -> CursorState {
        CursorSmoother::default().smooth(CursorState::new(cx, cy), Point2D::new(tx, ty))
    }

    #[test]
    fn test_far_target_moves_half() {
        assert_eq!(smooth(0, 0, 3000, 0), CursorState::new(1500, 0));
    }

    #[test]
    fn test_dead_zone_does_not_move() {
        assert_eq!(smooth(0, 0, 500, 0), CursorState::new(0, 0));
        assert_eq!(smooth(10_000, 10_000, 10_800, 10_000), CursorState::new(10_000, 10_000));
    }

    #[test]
    fn test_band_boundaries() {
        // Exactly on a boundary falls into the slower band.
        assert_eq!(smooth(0, 0, 2000, 0), CursorState::new(500, 0));
        assert_eq!(smooth(0, 0, 1500, 0), CursorState::new(187, 0));
        assert_eq!(smooth(0, 0, 801, 0), CursorState::new(100, 0));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        // dx = -1001 over 8 -> -125, not -126.
        assert_eq!(smooth(5000, 0, 3999, 0), CursorState::new(4875, 0));
        // dx = 1999, dy = 1 -> 499 and 0 in the 1500-2000 band.
        assert_eq!(smooth(0, 0, 1999, 1), CursorState::new(499, 0));
    }

    #[test]
    fn test_diagonal_distance() {
        // 1200/1600 diagonal is 2000 exactly: quarter step.
        assert_eq!(smooth(0, 0, 1200, 1600), CursorState::new(300, 400));
    }

    proptest! {
        #[test]
        fn prop_never_overshoots_and_stays_in_range(
            cx in 0u16..=32767, cy in 0u16..=32767,
            tx in 0i32..=32767, ty in 0i32..=32767,
        ) {
            let current = CursorState::new(cx, cy);
            let target = Point2D::new(tx, ty);
            let next = CursorSmoother::default().smooth(current, target);

            prop_assert!(next.as_point().distance_to(&target) <= current.as_point().distance_to(&target));
            prop_assert!(next.x <= 32767 && next.y <= 32767);
        }

        #[test]
        fn prop_dead_zone_is_exact(
            cx in 1000u16..30000, cy in 1000u16..30000,
            ox in -500i32..=500, oy in -500i32..=500,
        ) {
            let current = CursorState::new(cx, cy);
            let target = Point2D::new(i32::from(cx) + ox, i32::from(cy) + oy);
            prop_assert_eq!(CursorSmoother::default().smooth(current, target), current);
        }
    }
}
