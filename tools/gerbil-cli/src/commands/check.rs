//! Check the HID gadget device and camera.

use std::path::PathBuf;

use gerbil_common::config::AppConfig;
use gerbil_hid_gadget::backends::device_diagnostic;
use gerbil_hid_gadget::descriptor::{matches_report_len, FUNCTION_ATTRS};
use gerbil_hid_gadget::HidGadget;

pub fn run(config: &AppConfig, device: Option<PathBuf>) -> anyhow::Result<()> {
    let device = device.unwrap_or_else(|| config.device.path.clone());

    println!("Gerbil System Check");
    println!("{}", "=".repeat(50));

    let mut ready = true;

    if !device.exists() {
        println!("[FAIL] HID gadget: {} not found", device.display());
        println!("       {}", device_diagnostic(&device));
        ready = false;
    } else if HidGadget::is_supported(&device) {
        println!("[OK] HID gadget: {} is writable", device.display());
    } else {
        println!("[FAIL] HID gadget: {} is not writable", device.display());
        println!("       {}", device_diagnostic(&device));
        ready = false;
    }

    if matches_report_len() {
        println!(
            "[OK] Report descriptor: {}-byte reports (protocol {}, subclass {})",
            FUNCTION_ATTRS.report_length, FUNCTION_ATTRS.protocol, FUNCTION_ATTRS.subclass
        );
    } else {
        println!("[FAIL] Report descriptor does not match the report length");
        ready = false;
    }

    if let Err(e) = config.calibration.validate() {
        println!("[FAIL] Calibration: {e}");
        ready = false;
    } else {
        println!("[OK] Calibration: crop {}px", config.calibration.crop_size);
    }

    ready &= check_camera(config);

    println!();
    if ready {
        println!("All checks passed. Gerbil is ready.");
    } else {
        println!("Some checks failed. See above for fixes.");
    }

    Ok(())
}

#[cfg(feature = "camera")]
fn check_camera(config: &AppConfig) -> bool {
    use gerbil_capture_engine::source::camera::list_cameras;

    match list_cameras() {
        Ok(cameras) if cameras.is_empty() => {
            println!("[FAIL] Camera: none detected");
            false
        }
        Ok(cameras) => {
            println!("[OK] Cameras detected: {}", cameras.len());
            for (i, name) in cameras.iter().enumerate() {
                let marker = if i as u32 == config.camera.index {
                    "(selected)"
                } else {
                    ""
                };
                println!("     {name} {marker}");
            }
            true
        }
        Err(e) => {
            println!("[FAIL] Camera: {e}");
            false
        }
    }
}

#[cfg(not(feature = "camera"))]
fn check_camera(_config: &AppConfig) -> bool {
    println!("[WARN] Camera: built without camera support (use --frames DIR)");
    true
}
