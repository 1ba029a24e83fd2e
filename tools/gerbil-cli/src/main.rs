//! Gerbil CLI: turn hand gestures in front of a camera into USB mouse input.
//!
//! Usage:
//!   gerbil run [OPTIONS]       Run the gesture-to-pointer loop
//!   gerbil check               Check the HID gadget and camera
//!   gerbil descriptor          Print the HID report descriptor
//!   gerbil config              Print the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gerbil_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "gerbil",
    about = "Camera gesture mouse over a USB HID gadget",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/gerbil/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gesture-to-pointer loop until Ctrl+C
    Run {
        /// HID gadget device node
        #[arg(short, long)]
        device: Option<PathBuf>,

        /// Zero-based camera index
        #[arg(long)]
        camera: Option<u32>,

        /// Replay still images from this directory instead of the camera
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Compute reports without opening the HID device
        #[arg(long)]
        dry_run: bool,

        /// Write an annotated preview image to this path
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Refresh the preview every N frames
        #[arg(long, default_value = "30")]
        preview_every: u64,
    },

    /// Check the HID gadget device and camera
    Check {
        /// HID gadget device node
        #[arg(short, long)]
        device: Option<PathBuf>,
    },

    /// Print the HID report descriptor for configfs
    Descriptor {
        /// Write the raw bytes to stdout instead of hex
        #[arg(long)]
        raw: bool,
    },

    /// Print the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        write_defaults: bool,

        /// Overwrite an existing config file
        #[arg(long, requires = "write_defaults")]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = match &cli.config {
        Some(path) => (AppConfig::load_from(path), path.clone()),
        None => (AppConfig::load(), gerbil_common::config::config_file_path()),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    gerbil_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Run {
            device,
            camera,
            frames,
            dry_run,
            preview,
            preview_every,
        } => {
            let options = commands::run::RunOptions {
                device,
                camera,
                frames,
                dry_run,
                preview,
                preview_every,
            };
            commands::run::run(config, options).await
        }
        Commands::Check { device } => commands::check::run(&config, device),
        Commands::Descriptor { raw } => commands::descriptor::run(raw),
        Commands::Config {
            write_defaults,
            force,
        } => commands::config::run(&config, &config_path, write_defaults, force),
    }
}
