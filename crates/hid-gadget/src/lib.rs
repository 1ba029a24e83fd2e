//! Gerbil HID Gadget
//!
//! Delivers pointer reports to the USB host through a HID gadget function.
//! Uses a pluggable transport so the session can run without hardware:
//!
//! - **Gadget:** the `/dev/hidgN` character device of a configured gadget
//! - **Memory:** an in-process log of written reports, for tests and dry runs
//!
//! [`ReportWriter`] sits in front of the transport and suppresses reports
//! identical to the previously computed one.

pub mod backends;
pub mod descriptor;
pub mod writer;

use gerbil_common::error::GerbilResult;
use gerbil_model::REPORT_LEN;

pub use backends::{HidGadget, MemoryTransport};
pub use writer::ReportWriter;

/// Trait for HID report sinks.
pub trait HidTransport: Send {
    /// Write one encoded report. Failures are fatal for the session.
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> GerbilResult<()>;

    /// Transport name for logging.
    fn name(&self) -> &str;

    /// Release the underlying handle. Further writes fail.
    fn close(&mut self) -> GerbilResult<()> {
        Ok(())
    }
}
