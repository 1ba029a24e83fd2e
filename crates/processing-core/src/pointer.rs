//! Calibrated mapping from frame space to absolute screen space.

use gerbil_model::{Point2D, PointerWindow, ScreenSize};

/// Maps the tracked point through the pointer window onto the screen.
///
/// The horizontal axis is mirrored: the camera faces the user, so a hand
/// moving to its right moves left in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMapper {
    window: PointerWindow,
    screen: ScreenSize,
}

impl PointerMapper {
    /// `window` must have positive width and height.
    pub fn new(window: PointerWindow, screen: ScreenSize) -> Self {
        debug_assert!(window.is_valid(), "pointer window has no area");
        Self { window, screen }
    }

    pub fn window(&self) -> &PointerWindow {
        &self.window
    }

    /// Map a frame-space point to screen space.
    ///
    /// Points outside the window are clamped to its edge first, so the
    /// result always lies within `[0, width] x [0, height]`.
    pub fn map(&self, pointer: Point2D) -> Point2D {
        let tl = self.window.top_left;
        let br = self.window.bottom_right;

        let x = pointer.x.clamp(tl.x, br.x) - tl.x;
        let y = pointer.y.clamp(tl.y, br.y) - tl.y;

        let screen_w = f64::from(self.screen.width);
        let screen_h = f64::from(self.screen.height);

        let scaled_x = (f64::from(x) / f64::from(self.window.width()) * screen_w).round() as i32;
        let scaled_y = (f64::from(y) / f64::from(self.window.height()) * screen_h).round() as i32;

        Point2D::new(i32::from(self.screen.width) - scaled_x, scaled_y)
    }
}

impl Default for PointerMapper {
    fn default() -> Self {
        Self::new(PointerWindow::DEFAULT, ScreenSize::HID_ABSOLUTE)
    }
}
