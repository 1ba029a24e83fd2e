//! Thumb and pinky heuristics.
//!
//! Both signals look at the edge from the topmost hull vertex (a raised
//! index or middle finger) to a side extreme. A splayed thumb or pinky
//! pulls that side extreme outwards and flattens the edge; a tucked one
//! leaves it steep.

use gerbil_model::{ExtremePoints, Point2D};

/// Default thumb threshold in degrees.
pub const THUMB_ANGLE_DEG: f64 = 55.0;

/// Default pinky threshold in degrees.
pub const PINKY_ANGLE_DEG: f64 = 40.0;

/// Raw per-frame classifier output, before button state is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawGesture {
    pub thumb_shown: bool,
    pub pinky_shown: bool,
}

/// Stateless angle classifier with fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    thumb_angle_deg: f64,
    pinky_angle_deg: f64,
}

impl GestureClassifier {
    pub fn new(thumb_angle_deg: f64, pinky_angle_deg: f64) -> Self {
        Self {
            thumb_angle_deg,
            pinky_angle_deg,
        }
    }

    /// Evaluate both signals for one frame.
    pub fn classify(&self, extremes: &ExtremePoints) -> RawGesture {
        RawGesture {
            thumb_shown: self.thumb_shown(extremes.top, extremes.right),
            pinky_shown: self.pinky_shown(extremes.top, extremes.left),
        }
    }

    /// Thumb is shown when the top-right edge is flatter than the threshold.
    pub fn thumb_shown(&self, top: Point2D, right: Point2D) -> bool {
        edge_angle_deg(top, right).is_some_and(|angle| angle < self.thumb_angle_deg)
    }

    /// Pinky is shown when the top-left edge is flatter than the threshold.
    pub fn pinky_shown(&self, top: Point2D, left: Point2D) -> bool {
        edge_angle_deg(top, left).is_some_and(|angle| angle < self.pinky_angle_deg)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(THUMB_ANGLE_DEG, PINKY_ANGLE_DEG)
    }
}

/// Angle between the `from`-`to` edge and the horizontal axis, in `[0, 90]`.
///
/// `None` when both points share an x coordinate: the edge is vertical
/// and the slope is undefined.
pub fn edge_angle_deg(from: Point2D, to: Point2D) -> Option<f64> {
    if from.x == to.x {
        return None;
    }

    let rise = f64::from(to.y - from.y).abs();
    let run = f64::from(to.x - from.x).abs();
    Some((rise / run).atan().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOP: Point2D = Point2D::new(0, 0);

    #[test]
    fn test_vertical_edges_are_not_shown() {
        let classifier = GestureClassifier::default();
        assert!(!classifier.thumb_shown(TOP, Point2D::new(0, 80)));
        assert!(!classifier.pinky_shown(TOP, Point2D::new(0, 80)));
        // Same point: still no division by zero.
        assert!(!classifier.thumb_shown(TOP, TOP));
        assert!(!classifier.pinky_shown(TOP, TOP));
    }

    #[test]
    fn test_thumb_threshold_straddle() {
        let classifier = GestureClassifier::default();
        // atan(1.42) ~ 54.85 deg, atan(1.43) ~ 55.03 deg
        assert!(classifier.thumb_shown(TOP, Point2D::new(100, 142)));
        assert!(!classifier.thumb_shown(TOP, Point2D::new(100, 143)));
    }

    #[test]
    fn test_pinky_threshold_straddle() {
        let classifier = GestureClassifier::default();
        // atan(0.83) ~ 39.69 deg, atan(0.84) ~ 40.03 deg
        assert!(classifier.pinky_shown(TOP, Point2D::new(-100, 83)));
        assert!(!classifier.pinky_shown(TOP, Point2D::new(-100, 84)));
    }

    #[test]
    fn test_classify_open_hand() {
        // Wide flat sides: both thumb and pinky splayed.
        let extremes = ExtremePoints {
            top: Point2D::new(150, 20),
            right: Point2D::new(300, 80),
            bottom: Point2D::new(150, 400),
            left: Point2D::new(10, 90),
        };
        let raw = GestureClassifier::default().classify(&extremes);
        assert!(raw.thumb_shown);
        assert!(raw.pinky_shown);
    }

    #[test]
    fn test_classify_fist_with_raised_finger() {
        // Narrow steep sides: nothing splayed.
        let extremes = ExtremePoints {
            top: Point2D::new(150, 20),
            right: Point2D::new(190, 200),
            bottom: Point2D::new(150, 400),
            left: Point2D::new(110, 210),
        };
        assert_eq!(
            GestureClassifier::default().classify(&extremes),
            RawGesture::default()
        );
    }

    proptest! {
        #[test]
        fn prop_angle_is_within_quadrant(
            ax in -1000i32..1000, ay in -1000i32..1000,
            bx in -1000i32..1000, by in -1000i32..1000,
        ) {
            match edge_angle_deg(Point2D::new(ax, ay), Point2D::new(bx, by)) {
                Some(angle) => prop_assert!((0.0..=90.0).contains(&angle)),
                None => prop_assert_eq!(ax, bx),
            }
        }
    }
}
