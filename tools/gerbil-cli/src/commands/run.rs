//! Run the gesture-to-pointer loop.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::Context;
use gerbil_capture_engine::preview::save_preview;
use gerbil_capture_engine::source::{FrameSource, ImageDirSource};
use gerbil_capture_engine::{EdgeSilhouetteExtractor, Session, SessionStats};
use gerbil_common::config::AppConfig;
use gerbil_hid_gadget::MemoryTransport;

/// Command-line overrides for `gerbil run`.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub device: Option<PathBuf>,
    pub camera: Option<u32>,
    pub frames: Option<PathBuf>,
    pub dry_run: bool,
    pub preview: Option<PathBuf>,
    pub preview_every: u64,
}

pub async fn run(mut config: AppConfig, options: RunOptions) -> anyhow::Result<()> {
    if let Some(device) = &options.device {
        config.device.path = device.clone();
    }
    if let Some(index) = options.camera {
        config.camera.index = index;
    }

    println!("Starting gesture session");
    if options.dry_run {
        println!("  Device: none (dry run)");
    } else {
        println!("  Device: {}", config.device.path.display());
    }
    match &options.frames {
        Some(dir) => println!("  Frames: {}", dir.display()),
        None => println!("  Camera: {}", config.camera.index),
    }
    println!();

    // The session holds non-Send capture handles, so it is built and driven
    // entirely on the blocking thread. Its stop flag comes back over a channel.
    let (flag_tx, flag_rx) = tokio::sync::oneshot::channel();
    let mut worker = tokio::task::spawn_blocking(move || -> anyhow::Result<SessionStats> {
        let mut session = open_session(&config, &options)?;
        let _ = flag_tx.send(session.stop_flag());

        let driven = drive(&mut session, &options);
        let stopped = session.stop().context("Failed to stop session cleanly");
        driven?;
        stopped?;
        Ok(session.stats())
    });

    let stats = match flag_rx.await {
        Ok(stop_flag) => {
            println!("Press Ctrl+C to stop...");
            let finished = tokio::select! {
                joined = &mut worker => Some(joined),
                signal = tokio::signal::ctrl_c() => {
                    signal.context("Failed to listen for Ctrl+C")?;
                    None
                }
            };

            match finished {
                Some(joined) => joined??,
                None => {
                    println!();
                    tracing::info!("Interrupt received");
                    stop_flag.store(true, Ordering::SeqCst);
                    worker.await??
                }
            }
        }
        // The sender was dropped: the session never started.
        Err(_) => worker.await??,
    };

    println!(
        "Session stopped: {} frames, {} skipped, {} reports written",
        stats.frames, stats.skipped, stats.reports_written
    );
    Ok(())
}

fn open_session(config: &AppConfig, options: &RunOptions) -> anyhow::Result<Session> {
    let source = build_source(config, options)?;
    let extractor = Box::new(EdgeSilhouetteExtractor::new());
    let calibration = config.calibration.clone();

    let session = if options.dry_run {
        Session::with_transport(calibration, source, extractor, Box::new(MemoryTransport::new()))
    } else {
        Session::open(&config.device.path, calibration, source, extractor)
    };

    session.context("Failed to start gesture session")
}

fn build_source(config: &AppConfig, options: &RunOptions) -> anyhow::Result<Box<dyn FrameSource>> {
    if let Some(dir) = &options.frames {
        return Ok(Box::new(ImageDirSource::new(dir)));
    }
    camera_source(config)
}

#[cfg(feature = "camera")]
fn camera_source(config: &AppConfig) -> anyhow::Result<Box<dyn FrameSource>> {
    use gerbil_capture_engine::source::camera::CameraSource;
    Ok(Box::new(CameraSource::new(config.camera.clone())))
}

#[cfg(not(feature = "camera"))]
fn camera_source(_config: &AppConfig) -> anyhow::Result<Box<dyn FrameSource>> {
    anyhow::bail!("gerbil was built without camera support; pass --frames DIR or rebuild with --features camera")
}

fn drive(session: &mut Session, options: &RunOptions) -> anyhow::Result<()> {
    let every = options.preview_every.max(1);

    while !session.stop_requested() {
        let debug = options.preview.is_some() && session.stats().frames % every == 0;

        match session.step(debug) {
            Ok(Some(preview)) => {
                if let Some(path) = &options.preview {
                    // A failed preview never stops the pointer.
                    if let Err(e) = save_preview(&preview, path) {
                        tracing::warn!(error = %e, "Preview not written");
                    }
                }
            }
            Ok(None) => {}
            Err(e) if e.is_end_of_stream() => {
                tracing::info!("Frame source exhausted");
                break;
            }
            Err(e) => return Err(e).context("Gesture session failed"),
        }
    }

    Ok(())
}
