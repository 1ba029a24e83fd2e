//! Live camera capture through nokhwa.

use std::time::Duration;

use gerbil_common::config::CameraConfig;
use gerbil_common::error::{GerbilError, GerbilResult};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use super::FrameSource;
use crate::frame::Frame;

/// Camera source. The device is opened on `start`, not on construction.
pub struct CameraSource {
    config: CameraConfig,
    camera: Option<Camera>,
}

impl CameraSource {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            camera: None,
        }
    }
}

impl FrameSource for CameraSource {
    fn start(&mut self) -> GerbilResult<()> {
        let format = CameraFormat::new(
            Resolution::new(self.config.width, self.config.height),
            FrameFormat::YUYV,
            self.config.fps,
        );
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

        let mut camera = Camera::new(CameraIndex::Index(self.config.index), requested)
            .map_err(|e| GerbilError::capture(format!("Failed to open camera: {e}")))?;
        camera
            .open_stream()
            .map_err(|e| GerbilError::capture(format!("Failed to start camera stream: {e}")))?;

        let actual = camera.resolution();
        tracing::info!(
            index = self.config.index,
            width = actual.width(),
            height = actual.height(),
            fps = camera.frame_rate(),
            "Camera stream opened"
        );

        // Exposure and white balance settle during the first second.
        std::thread::sleep(Duration::from_millis(self.config.warmup_ms));

        self.camera = Some(camera);
        Ok(())
    }

    fn read(&mut self) -> GerbilResult<Frame> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| GerbilError::capture("camera is not streaming"))?;

        let buffer = camera
            .frame()
            .map_err(|e| GerbilError::capture(format!("Failed to fetch frame: {e}")))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| GerbilError::capture(format!("Failed to decode frame: {e}")))?;

        let (width, height) = decoded.dimensions();
        Frame::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| GerbilError::capture("decoded frame has an unexpected size"))
    }

    fn stop(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                tracing::warn!(error = %e, "Failed to stop camera stream");
            }
        }
    }

    fn name(&self) -> &str {
        "camera"
    }
}

/// Human-readable names of the cameras nokhwa can see.
pub fn list_cameras() -> GerbilResult<Vec<String>> {
    let cameras = nokhwa::query(nokhwa::utils::ApiBackend::Auto)
        .map_err(|e| GerbilError::capture(format!("Failed to enumerate cameras: {e}")))?;
    Ok(cameras
        .iter()
        .map(|info| format!("{} ({})", info.human_name(), info.index()))
        .collect())
}
