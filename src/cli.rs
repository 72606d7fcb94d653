//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, subcommand handlers, and
//! the startup diagnostics printed when the camera cannot be opened.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::camera::{self, CameraError};
use crate::config::{default_path as get_config_path, Config};

// ==================== CLI Arguments ====================

/// Webcam capture wrapper feeding a contour-detection backend
#[derive(Parser, Debug)]
#[command(name = "contour-cam")]
#[command(version, about = "Webcam preview and capture for contour detection", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras); overrides the config file
    #[arg(long)]
    pub camera: Option<u32>,

    /// Disable horizontal mirroring
    #[arg(long)]
    pub no_mirror: bool,

    /// Number of preview cycles to run (0 = until Ctrl+C)
    #[arg(long, default_value = "0")]
    pub frames: u64,

    /// Request a capture on this cycle (1-based) and keep the snapshot
    #[arg(long)]
    pub capture_at: Option<u64>,

    /// Write the captured snapshot to this PNG path
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

// ==================== Subcommand Handlers ====================

/// List available cameras and print them to stdout.
pub fn list_cameras() {
    match camera::list_devices() {
        Ok(devices) => {
            if devices.is_empty() {
                println!("No cameras found.");
                println!();
                println!("Make sure your camera is connected and permissions are granted.");
                println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
            } else {
                println!("Available cameras:");
                for device in devices {
                    println!("  {}", device);
                }
                println!();
                println!("Use --camera <index> to select a camera.");
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&PathBuf>) {
    match action {
        ConfigAction::Show => match Config::load(path.map(|p| p.as_path())) {
            Ok(config) => {
                println!("Config file: {}", display_config_path(path));
                println!("{:#?}", config);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        ConfigAction::Init => {
            let target = path.cloned().unwrap_or_else(get_config_path);
            if target.exists() {
                eprintln!("Config file already exists: {}", target.display());
                std::process::exit(1);
            }
            if let Some(parent) = target.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error: failed to create {}: {}", parent.display(), e);
                    std::process::exit(1);
                }
            }
            if let Err(e) = std::fs::write(&target, DEFAULT_CONFIG_TOML) {
                eprintln!("Error: failed to write {}: {}", target.display(), e);
                std::process::exit(1);
            }
            println!("Created {}", target.display());
        }
    }
}

fn display_config_path(path: Option<&PathBuf>) -> String {
    path.cloned()
        .unwrap_or_else(get_config_path)
        .display()
        .to_string()
}

const DEFAULT_CONFIG_TOML: &str = "\
[camera]
device = 0
mirror = true
fps = 30
# width = 640
# height = 480
";

// ==================== Startup Diagnostics ====================

/// Format the startup diagnostic for a failed camera open.
///
/// Enumerates the likely causes so the user can fix the setup; printed to
/// stderr by the binary right before it exits with status 1.
pub fn open_failure_diagnostic(err: &CameraError) -> String {
    let mut msg = String::new();
    msg.push_str(&format!("ERROR: Camera not detected! ({})\n", err));
    msg.push_str("Please check:\n");
    msg.push_str("  - Camera is connected\n");
    msg.push_str("  - Camera permissions are granted\n");
    msg.push_str("  - No other application is using the camera\n");
    msg.push_str("  - Try a different device index with --camera (see list-cameras)\n");
    msg
}
