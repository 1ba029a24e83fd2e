//! Application configuration.

use std::path::PathBuf;

use gerbil_model::{PointerWindow, ScreenSize};
use serde::{Deserialize, Serialize};

use crate::error::{GerbilError, GerbilResult};

/// Default HID gadget device node.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/hidg0";

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HID gadget output device.
    pub device: DeviceConfig,

    /// Camera capture settings.
    pub camera: CameraConfig,

    /// Fixed calibration constants of the gesture pipeline.
    pub calibration: Calibration,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// HID gadget output device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Character device created by the USB HID gadget function.
    pub path: PathBuf,
}

/// Camera capture parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zero-based camera index.
    pub index: u32,

    pub width: u32,
    pub height: u32,
    pub fps: u32,

    /// Delay after opening the stream before frames are trusted.
    pub warmup_ms: u64,
}

/// Calibration constants. Read once at startup, never changed while running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Side of the top-left square cropped from each frame (pixels).
    pub crop_size: u32,

    /// Boundaries enclosing less area than this are ignored (pixels²).
    pub min_area: f64,

    /// Frame-space rectangle mapped onto the full screen.
    pub pointer_window: PointerWindow,

    /// Absolute screen range.
    pub screen: ScreenSize,

    /// Thumb counts as shown below this top-right edge angle (degrees).
    pub thumb_angle_deg: f64,

    /// Pinky counts as shown below this top-left edge angle (degrees).
    pub pinky_angle_deg: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level for gerbil crates ("info", "debug") or a full filter
    /// directive ("gerbil_capture_engine=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DEVICE_PATH),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 640,
            height: 480,
            fps: 30,
            warmup_ms: 1000,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            crop_size: 420,
            min_area: 1000.0,
            pointer_window: PointerWindow::DEFAULT,
            screen: ScreenSize::HID_ABSOLUTE,
            thumb_angle_deg: 55.0,
            pinky_angle_deg: 40.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Calibration {
    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> GerbilResult<()> {
        if self.crop_size == 0 {
            return Err(GerbilError::config("crop_size must be positive"));
        }
        if !self.pointer_window.is_valid() {
            return Err(GerbilError::config(format!(
                "pointer window {:?} has no area",
                self.pointer_window
            )));
        }
        for (name, angle) in [
            ("thumb_angle_deg", self.thumb_angle_deg),
            ("pinky_angle_deg", self.pinky_angle_deg),
        ] {
            if !(0.0..=90.0).contains(&angle) {
                return Err(GerbilError::config(format!(
                    "{name} must be within [0, 90], got {angle}"
                )));
            }
        }
        Ok(())
    }
}

impl LoggingConfig {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    ///
    /// A bare level applies to gerbil crates only; dependencies stay at `warn`.
    pub fn filter_directive(&self) -> String {
        if self.level.contains('=') || self.level.contains(',') {
            return self.level.clone();
        }
        let level = &self.level;
        format!(
            "warn,gerbil={level},gerbil_common={level},gerbil_processing_core={level},\
             gerbil_hid_gadget={level},gerbil_capture_engine={level}"
        )
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the given location.
    pub fn save_to(&self, config_path: &std::path::Path) -> GerbilResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gerbil").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calibration_constants() {
        let config = AppConfig::default();
        assert_eq!(config.device.path, PathBuf::from("/dev/hidg0"));
        assert_eq!(config.calibration.crop_size, 420);
        assert_eq!(config.calibration.min_area, 1000.0);
        assert_eq!(config.calibration.screen.width, 32767);
        assert!(config.calibration.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"device":{"path":"/dev/hidg1"}}"#).unwrap();
        assert_eq!(config.device.path, PathBuf::from("/dev/hidg1"));
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.calibration, Calibration::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("gerbil_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.camera.index = 2;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("gerbil_test_config_bad");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validate_rejects_bad_calibration() {
        let mut calibration = Calibration::default();
        calibration.thumb_angle_deg = 120.0;
        assert!(calibration.validate().is_err());

        let mut calibration = Calibration::default();
        calibration.pointer_window.bottom_right = calibration.pointer_window.top_left;
        assert!(calibration.validate().is_err());
    }

    #[test]
    fn test_filter_directive() {
        let bare = LoggingConfig::default().filter_directive();
        assert!(bare.starts_with("warn,"));
        assert!(bare.contains("gerbil_capture_engine=info"));

        let custom = LoggingConfig {
            level: "gerbil_hid_gadget=trace".to_string(),
            json: false,
        };
        assert_eq!(custom.filter_directive(), "gerbil_hid_gadget=trace");
    }
}
