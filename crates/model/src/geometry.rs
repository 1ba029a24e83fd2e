//! Integer geometry for frame space and screen space.

use serde::{Deserialize, Serialize};

/// Largest value of an absolute HID pointer axis.
pub const HID_AXIS_MAX: u16 = 32767;

/// An integer pixel coordinate.
///
/// Whether it lives in frame space (camera pixels) or screen space
/// (HID absolute units) depends on the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: i32,
    pub y: i32,
}

impl Point2D {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// The four axis-extreme vertices of a convex hull.
///
/// All four points come from the same hull. When several vertices share
/// the extreme coordinate, the first one in hull order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremePoints {
    pub top: Point2D,
    pub right: Point2D,
    pub bottom: Point2D,
    pub left: Point2D,
}

/// Calibrated rectangle in frame space that maps onto the whole screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerWindow {
    pub top_left: Point2D,
    pub bottom_right: Point2D,
}

impl PointerWindow {
    /// Window used with a 420px square crop of a 640x480 camera frame.
    pub const DEFAULT: PointerWindow = PointerWindow {
        top_left: Point2D::new(5, 5),
        bottom_right: Point2D::new(320, 320),
    };

    pub const fn new(top_left: Point2D, bottom_right: Point2D) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y
    }

    /// A window with zero or negative extent cannot be scaled from.
    pub fn is_valid(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }
}

impl Default for PointerWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Size of the absolute screen coordinate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u16,
    pub height: u16,
}

impl ScreenSize {
    /// Full HID absolute range on both axes.
    pub const HID_ABSOLUTE: ScreenSize = ScreenSize {
        width: HID_AXIS_MAX,
        height: HID_AXIS_MAX,
    };
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::HID_ABSOLUTE
    }
}
