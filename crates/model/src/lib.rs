//! Gerbil Model
//!
//! Defines the plain data passed between pipeline stages:
//! - **Geometry:** integer points, extreme points, the calibrated pointer window
//! - **Shapes:** silhouette boundaries and their convex hulls
//! - **State:** held button state and the absolute cursor position
//! - **Report:** the 5-byte HID pointer report and its wire encoding
//!
//! Frame-space values are camera pixels; screen-space values are HID
//! absolute units in `[0, 32767]`.

pub mod geometry;
pub mod report;
pub mod shape;
pub mod state;

pub use geometry::*;
pub use report::*;
pub use shape::*;
pub use state::*;
