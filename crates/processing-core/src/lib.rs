//! Gerbil Processing Core
//!
//! The per-frame decisions between a silhouette hull and a HID report:
//! - **Extreme points:** topmost/rightmost/bottommost/leftmost hull vertices
//! - **Gesture heuristics:** thumb and pinky visibility from edge angles
//! - **Buttons:** edge-triggered press/release of the two virtual buttons
//! - **Pointer mapping:** calibrated window to absolute screen coordinates
//! - **Cursor smoothing:** distance-banded deceleration with a dead zone
//!
//! This crate is pure computation: no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod buttons;
pub mod cursor_smooth;
pub mod extreme;
pub mod gesture;
pub mod pointer;

pub use buttons::update_buttons;
pub use cursor_smooth::CursorSmoother;
pub use extreme::extreme_points;
pub use gesture::GestureClassifier;
pub use pointer::PointerMapper;
