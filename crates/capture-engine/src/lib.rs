//! Gerbil Capture Engine
//!
//! Turns camera frames into HID pointer reports, one frame at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                       Session                        │
//! │  ┌─────────────┐  ┌─────────────────────┐            │
//! │  │ FrameSource │─▶│ SilhouetteExtractor │            │
//! │  └─────────────┘  └──────────┬──────────┘            │
//! │                     boundary │ hull                   │
//! │                              ▼                        │
//! │  ┌─────────────────────────────────────────────────┐ │
//! │  │ processing-core: extremes → buttons / pointer    │ │
//! │  │                  → smoother                      │ │
//! │  └──────────────────────┬──────────────────────────┘ │
//! │                         ▼                            │
//! │                 ReportWriter → /dev/hidg0            │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The session is single-threaded: `step()` runs one frame to completion
//! and owns all gesture, cursor and last-report state.

pub mod frame;
pub mod preview;
pub mod session;
pub mod source;
pub mod vision;

pub use frame::Frame;
pub use session::*;
pub use source::FrameSource;
pub use vision::{EdgeSilhouetteExtractor, SilhouetteExtractor};
