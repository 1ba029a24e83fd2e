//! State held across frames by a session.

use crate::geometry::{Point2D, HID_AXIS_MAX};

/// Held state of the two virtual mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    /// Driven by the thumb signal.
    pub primary_pressed: bool,
    /// Driven by the pinky signal.
    pub secondary_pressed: bool,
}

impl GestureState {
    /// Both buttons released.
    pub const RELEASED: GestureState = GestureState {
        primary_pressed: false,
        secondary_pressed: false,
    };

    pub fn any_pressed(&self) -> bool {
        self.primary_pressed || self.secondary_pressed
    }
}

/// Absolute cursor position in screen space, `[0, 32767]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub x: u16,
    pub y: u16,
}

impl CursorState {
    pub const ORIGIN: CursorState = CursorState { x: 0, y: 0 };

    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Build a cursor from a screen-space point, clamping each axis into range.
    pub fn from_point(point: Point2D) -> Self {
        Self {
            x: clamp_axis(point.x),
            y: clamp_axis(point.y),
        }
    }

    pub fn as_point(&self) -> Point2D {
        Point2D::new(i32::from(self.x), i32::from(self.y))
    }
}

fn clamp_axis(value: i32) -> u16 {
    // Lossless after the clamp.
    value.clamp(0, i32::from(HID_AXIS_MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_states_are_zero() {
        assert_eq!(GestureState::default(), GestureState::RELEASED);
        assert!(!GestureState::default().any_pressed());
        assert_eq!(CursorState::default(), CursorState::ORIGIN);
    }

    #[test]
    fn test_from_point_clamps() {
        let cursor = CursorState::from_point(Point2D::new(-12, 40_000));
        assert_eq!(cursor, CursorState::new(0, 32767));
    }

    #[test]
    fn test_point_conversion_keeps_values() {
        let cursor = CursorState::new(1500, 77);
        assert_eq!(CursorState::from_point(cursor.as_point()), cursor);
    }
}
