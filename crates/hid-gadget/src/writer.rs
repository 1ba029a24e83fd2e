//! Change-only report writer.

use gerbil_common::error::GerbilResult;
use gerbil_model::HidReport;

use crate::HidTransport;

/// Writes reports to a transport, skipping repeats of the last computed report.
///
/// The comparison is against the most recently *computed* report, so a run
/// of identical frames produces exactly one write.
pub struct ReportWriter {
    transport: Box<dyn HidTransport>,
    last_sent: Option<HidReport>,
    reports_written: u64,
    reports_skipped: u64,
}

impl ReportWriter {
    pub fn new(transport: Box<dyn HidTransport>) -> Self {
        Self {
            transport,
            last_sent: None,
            reports_written: 0,
            reports_skipped: 0,
        }
    }

    /// Send `report` unless it equals the previous one.
    ///
    /// Returns whether a write happened. A transport failure is returned
    /// as is; it is not retried.
    pub fn send(&mut self, report: HidReport) -> GerbilResult<bool> {
        let changed = self.last_sent != Some(report);

        if changed {
            self.transport.write_report(&report.to_bytes())?;
            self.reports_written += 1;
            tracing::trace!(
                buttons = report.buttons,
                x = report.x,
                y = report.y,
                "HID report written"
            );
        } else {
            self.reports_skipped += 1;
        }

        self.last_sent = Some(report);
        Ok(changed)
    }

    /// Send the final report, then close the transport.
    ///
    /// Taking `self` means the handle cannot be released without passing
    /// `final_report` through the same change-only path first. The transport
    /// is closed even when that last write fails; the write error wins.
    ///
    /// Returns the total number of reports written.
    pub fn finish(mut self, final_report: HidReport) -> GerbilResult<u64> {
        let sent = self.send(final_report);

        tracing::debug!(
            transport = self.transport.name(),
            written = self.reports_written,
            skipped = self.reports_skipped,
            "Closing HID transport"
        );
        let closed = self.transport.close();

        sent.and(closed).map(|_| self.reports_written)
    }

    pub fn last_sent(&self) -> Option<HidReport> {
        self.last_sent
    }

    pub fn reports_written(&self) -> u64 {
        self.reports_written
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }
}
