//! Gesture session management.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gerbil_common::config::Calibration;
use gerbil_common::error::{GerbilError, GerbilResult};
use gerbil_hid_gadget::{HidGadget, HidTransport, ReportWriter};
use gerbil_model::{CursorState, GestureState, HidReport};
use gerbil_processing_core::buttons::{ButtonEdge, ButtonEdges};
use gerbil_processing_core::extreme::pointer_point;
use gerbil_processing_core::{
    extreme_points, update_buttons, CursorSmoother, GestureClassifier, PointerMapper,
};

use crate::frame::{crop_square, Frame};
use crate::preview;
use crate::source::FrameSource;
use crate::vision::SilhouetteExtractor;

/// State of a gesture session.
///
/// A session only exists once construction succeeded, so there is no
/// separate "not started" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Frames are being processed.
    Running,
    /// Capture stopped and the device handle released. Terminal.
    Stopped,
}

/// Counters reported when the session stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames pulled from the source.
    pub frames: u64,
    /// Frames without a large enough silhouette.
    pub skipped: u64,
    /// Reports actually written to the transport.
    pub reports_written: u64,
}

/// A running gesture-to-pointer session.
///
/// Owns the frame source, the HID transport and all mutable pointer state.
/// Each [`Session::step`] processes exactly one frame to completion.
pub struct Session {
    state: SessionState,
    source: Box<dyn FrameSource>,
    extractor: Box<dyn SilhouetteExtractor>,
    writer: Option<ReportWriter>,
    calibration: Calibration,
    classifier: GestureClassifier,
    mapper: PointerMapper,
    smoother: CursorSmoother,
    gesture: GestureState,
    cursor: CursorState,
    stop_flag: Arc<AtomicBool>,
    stats: SessionStats,
}

impl Session {
    /// Open the HID gadget at `device_path` and start `source`.
    ///
    /// Fails with [`GerbilError::DeviceNotFound`] before touching the
    /// source when the device node does not exist.
    pub fn open(
        device_path: impl AsRef<Path>,
        calibration: Calibration,
        source: Box<dyn FrameSource>,
        extractor: Box<dyn SilhouetteExtractor>,
    ) -> GerbilResult<Self> {
        let gadget = HidGadget::open(device_path)?;
        Self::with_transport(calibration, source, extractor, Box::new(gadget))
    }

    /// Build a session over an already opened transport.
    pub fn with_transport(
        calibration: Calibration,
        mut source: Box<dyn FrameSource>,
        extractor: Box<dyn SilhouetteExtractor>,
        transport: Box<dyn HidTransport>,
    ) -> GerbilResult<Self> {
        calibration.validate()?;

        // On failure the transport is dropped unused; no report was sent yet.
        let writer = ReportWriter::new(transport);
        source.start()?;

        tracing::info!(
            source = source.name(),
            transport = writer.transport_name(),
            crop = calibration.crop_size,
            "Gesture session started"
        );

        Ok(Self {
            state: SessionState::Running,
            source,
            extractor,
            writer: Some(writer),
            classifier: GestureClassifier::new(
                calibration.thumb_angle_deg,
                calibration.pinky_angle_deg,
            ),
            mapper: PointerMapper::new(calibration.pointer_window, calibration.screen),
            smoother: CursorSmoother::default(),
            calibration,
            gesture: GestureState::RELEASED,
            cursor: CursorState::ORIGIN,
            stop_flag: Arc::new(AtomicBool::new(false)),
            stats: SessionStats::default(),
        })
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Get a clone of the stop flag for use in signal handlers.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_flag.load(Ordering::SeqCst)
    }

    /// Process one frame.
    ///
    /// With `debug` set, returns the cropped frame; it is annotated with the
    /// boundary and hull when a silhouette was used. Frames whose largest
    /// boundary is below the area threshold leave all state untouched and
    /// send nothing.
    pub fn step(&mut self, debug: bool) -> GerbilResult<Option<Frame>> {
        if self.state != SessionState::Running {
            return Err(GerbilError::session("step called on a stopped session"));
        }

        let frame = self.source.read()?;
        self.stats.frames += 1;
        let cropped = crop_square(&frame, self.calibration.crop_size);

        let silhouette = match self.extractor.largest_boundary(&cropped)? {
            Some(s) if s.area >= self.calibration.min_area => s,
            other => {
                self.stats.skipped += 1;
                tracing::trace!(
                    area = other.map(|s| s.area).unwrap_or(0.0),
                    "No usable silhouette"
                );
                return Ok(debug.then_some(cropped));
            }
        };

        let hull = self.extractor.convex_hull(&silhouette.boundary);
        let Some(extremes) = extreme_points(&hull) else {
            self.stats.skipped += 1;
            return Ok(debug.then_some(cropped));
        };

        let raw = self.classifier.classify(&extremes);
        let edges = update_buttons(&mut self.gesture, raw);
        log_edges(&edges);

        let target = self.mapper.map(pointer_point(&extremes));
        self.cursor = self.smoother.smooth(self.cursor, target);

        let report = HidReport::encode(&self.gesture, &self.cursor);
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| GerbilError::session("HID transport already closed"))?;
        writer.send(report)?;
        self.stats.reports_written = writer.reports_written();

        Ok(debug.then(|| preview::annotate(&cropped, &silhouette.boundary.points, &hull.points)))
    }

    /// Stop capture, release both buttons and close the device.
    ///
    /// The neutral report goes out through the change-only writer before the
    /// handle is closed. Calling `stop` again is a no-op.
    pub fn stop(&mut self) -> GerbilResult<()> {
        if self.state == SessionState::Stopped {
            return Ok(());
        }

        tracing::info!("Stopping gesture session");
        self.state = SessionState::Stopped;
        self.stop_flag.store(true, Ordering::SeqCst);

        self.source.stop();
        self.gesture = GestureState::RELEASED;

        let final_report = HidReport::encode(&self.gesture, &self.cursor);
        let result = match self.writer.take() {
            Some(writer) => writer
                .finish(final_report)
                .map(|written| self.stats.reports_written = written),
            None => Ok(()),
        };

        tracing::info!(
            frames = self.stats.frames,
            skipped = self.stats.skipped,
            reports = self.stats.reports_written,
            "Gesture session stopped"
        );

        result
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.state == SessionState::Running {
            if let Err(e) = self.stop() {
                tracing::warn!(error = %e, "Gesture session teardown failed");
            }
        }
    }
}

fn log_edges(edges: &ButtonEdges) {
    for (button, edge) in [("primary", edges.primary), ("secondary", edges.secondary)] {
        match edge {
            ButtonEdge::Pressed => tracing::debug!(button, "Button pressed"),
            ButtonEdge::Released => tracing::debug!(button, "Button released"),
            ButtonEdge::Unchanged => {}
        }
    }
}
