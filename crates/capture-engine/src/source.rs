//! Frame sources.
//!
//! The session only needs three operations from a capture device: start
//! streaming, read the next frame (blocking), stop. Sources:
//!
//! - [`camera::CameraSource`]: live camera through nokhwa (`camera` feature)
//! - [`ImageDirSource`]: replays still images from a directory
//! - [`StubSource`]: preloaded frames for tests

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use gerbil_common::error::{GerbilError, GerbilResult};

use crate::frame::Frame;

#[cfg(feature = "camera")]
pub mod camera;

/// Trait for frame capture backends.
pub trait FrameSource {
    /// Begin streaming. Called once, before the first `read`.
    fn start(&mut self) -> GerbilResult<()>;

    /// Block until the next frame is available.
    ///
    /// Finite sources return [`GerbilError::EndOfStream`] when exhausted.
    fn read(&mut self) -> GerbilResult<Frame>;

    /// Stop streaming and release the device.
    fn stop(&mut self);

    /// Source name for logging.
    fn name(&self) -> &str;
}

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Replays the images of a directory in file-name order.
pub struct ImageDirSource {
    dir: PathBuf,
    pending: VecDeque<PathBuf>,
    frames_read: u64,
}

impl ImageDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pending: VecDeque::new(),
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    fn list_images(dir: &Path) -> GerbilResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_image {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl FrameSource for ImageDirSource {
    fn start(&mut self) -> GerbilResult<()> {
        let paths = Self::list_images(&self.dir).map_err(|e| {
            GerbilError::capture(format!("Failed to list {}: {e}", self.dir.display()))
        })?;
        if paths.is_empty() {
            return Err(GerbilError::capture(format!(
                "No images found in {}",
                self.dir.display()
            )));
        }

        tracing::info!(dir = %self.dir.display(), frames = paths.len(), "Replaying image directory");
        self.pending = paths.into();
        Ok(())
    }

    fn read(&mut self) -> GerbilResult<Frame> {
        let path = self.pending.pop_front().ok_or(GerbilError::EndOfStream)?;
        let frame = image::open(&path)
            .map_err(|e| GerbilError::capture(format!("Failed to decode {}: {e}", path.display())))?
            .to_rgb8();
        self.frames_read += 1;
        Ok(frame)
    }

    fn stop(&mut self) {
        self.pending.clear();
    }

    fn name(&self) -> &str {
        "image-dir"
    }
}

/// Preloaded frames for tests; ends with `EndOfStream`.
pub struct StubSource {
    frames: VecDeque<Frame>,
    started: bool,
    stopped: bool,
}

impl StubSource {
    /// Create a stub source with pre-loaded frames.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            started: false,
            stopped: false,
        }
    }

    /// `count` blank frames of the given size.
    pub fn blank(count: usize, width: u32, height: u32) -> Self {
        Self::new(vec![Frame::new(width, height); count])
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl FrameSource for StubSource {
    fn start(&mut self) -> GerbilResult<()> {
        self.started = true;
        Ok(())
    }

    fn read(&mut self) -> GerbilResult<Frame> {
        if !self.started || self.stopped {
            return Err(GerbilError::capture("stub source is not streaming"));
        }
        self.frames.pop_front().ok_or(GerbilError::EndOfStream)
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_stub_source_ends() {
        let mut source = StubSource::blank(1, 8, 8);
        assert!(source.read().is_err());

        source.start().unwrap();
        assert_eq!(source.read().unwrap().dimensions(), (8, 8));
        assert!(source.read().unwrap_err().is_end_of_stream());

        source.stop();
        assert!(source.is_stopped());
    }

    #[test]
    fn test_image_dir_replays_in_name_order() {
        let dir = std::env::temp_dir().join("gerbil_test_image_dir");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        Frame::from_pixel(4, 4, Rgb([200, 0, 0]))
            .save(dir.join("frame_002.png"))
            .unwrap();
        Frame::from_pixel(4, 4, Rgb([0, 200, 0]))
            .save(dir.join("frame_001.png"))
            .unwrap();
        std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();

        let mut source = ImageDirSource::new(&dir);
        source.start().unwrap();
        assert_eq!(source.read().unwrap().get_pixel(0, 0), &Rgb([0, 200, 0]));
        assert_eq!(source.read().unwrap().get_pixel(0, 0), &Rgb([200, 0, 0]));
        assert!(source.read().unwrap_err().is_end_of_stream());
        assert_eq!(source.frames_read(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_image_dir_without_images_fails_to_start() {
        let dir = std::env::temp_dir().join("gerbil_test_image_dir_empty");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        assert!(ImageDirSource::new(&dir).start().is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
