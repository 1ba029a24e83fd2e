//! HID transport implementations.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use gerbil_common::error::{GerbilError, GerbilResult};
use gerbil_model::{HidReport, REPORT_LEN};

use crate::HidTransport;

/// Write-only handle on a HID gadget character device (`/dev/hidgN`).
pub struct HidGadget {
    device: Option<File>,
    path: PathBuf,
}

impl HidGadget {
    /// Open the gadget device for writing.
    ///
    /// A missing device node means the gadget function is not configured;
    /// that is reported as [`GerbilError::DeviceNotFound`].
    pub fn open(path: impl AsRef<Path>) -> GerbilResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GerbilError::DeviceNotFound {
                path: path.to_path_buf(),
            });
        }

        let device = OpenOptions::new().write(true).open(path).map_err(|e| {
            GerbilError::transport(format!(
                "Failed to open {}: {e} ({})",
                path.display(),
                device_diagnostic(path)
            ))
        })?;

        tracing::debug!(device = %path.display(), "HID gadget opened");

        Ok(Self {
            device: Some(device),
            path: path.to_path_buf(),
        })
    }

    /// Whether the device exists and is writable by this process.
    pub fn is_supported(path: impl AsRef<Path>) -> bool {
        OpenOptions::new().write(true).open(path).is_ok()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HidTransport for HidGadget {
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> GerbilResult<()> {
        let device = self.device.as_mut().ok_or_else(|| {
            GerbilError::transport(format!("{} is already closed", self.path.display()))
        })?;

        device.write_all(report).map_err(|e| {
            GerbilError::transport(format!(
                "Failed writing report to {}: {e}",
                self.path.display()
            ))
        })
    }

    fn name(&self) -> &str {
        "hidg"
    }

    fn close(&mut self) -> GerbilResult<()> {
        if let Some(device) = self.device.take() {
            drop(device);
            tracing::debug!(device = %self.path.display(), "HID gadget closed");
        }
        Ok(())
    }
}

/// Explain why a gadget device cannot be used by this process.
#[cfg(target_os = "linux")]
pub fn device_diagnostic(path: &Path) -> String {
    use std::os::unix::fs::MetadataExt;

    // SAFETY: geteuid/getegid have no preconditions and cannot fail.
    let uid = unsafe { libc::geteuid() };
    let gid = unsafe { libc::getegid() };

    match std::fs::metadata(path) {
        Ok(meta) => {
            let mode = meta.mode() & 0o777;
            let owner = meta.uid();
            let group = meta.gid();
            format!(
                "device={} mode={mode:o} owner_uid={owner} owner_gid={group} process_uid={uid} process_gid={gid}; run as root or grant write access to the device",
                path.display()
            )
        }
        Err(err) => format!(
            "device={} unavailable ({err}); configure the HID gadget through configfs and bind it to a UDC",
            path.display()
        ),
    }
}

/// Explain why a gadget device cannot be used by this process.
#[cfg(not(target_os = "linux"))]
pub fn device_diagnostic(path: &Path) -> String {
    format!(
        "device={}; USB HID gadgets are only supported on Linux",
        path.display()
    )
}

#[derive(Debug, Default)]
struct MemoryLog {
    reports: Vec<HidReport>,
    closed: bool,
    fail_after: Option<usize>,
}

/// In-memory transport recording every written report.
///
/// Clones share the same log, so a test can keep one clone while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    log: Arc<Mutex<MemoryLog>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose writes start failing once `writes` reports were accepted.
    pub fn failing_after(writes: usize) -> Self {
        let transport = Self::default();
        transport.lock().fail_after = Some(writes);
        transport
    }

    /// Reports written so far, oldest first.
    pub fn reports(&self) -> Vec<HidReport> {
        self.lock().reports.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().reports.len()
    }

    pub fn last_report(&self) -> Option<HidReport> {
        self.lock().reports.last().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, MemoryLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HidTransport for MemoryTransport {
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> GerbilResult<()> {
        let mut log = self.lock();
        if log.closed {
            return Err(GerbilError::transport("memory transport is closed"));
        }
        if log.fail_after.is_some_and(|limit| log.reports.len() >= limit) {
            return Err(GerbilError::transport("simulated host disconnect"));
        }
        log.reports.push(HidReport::from_bytes(*report));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn close(&mut self) -> GerbilResult<()> {
        self.lock().closed = true;
        Ok(())
    }
}
