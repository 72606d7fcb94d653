use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};

use contour_cam::camera::CameraCapture;
use contour_cam::cli::{self, Args, Command};
use contour_cam::config::Config;
use contour_cam::processor::PassthroughProcessor;
use contour_cam::session::CaptureSession;

/// Global flag for handling Ctrl+C across the application
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C has been received.
fn ctrlc_received() -> bool {
    CTRLC_RECEIVED.load(Ordering::SeqCst)
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup.
fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
        eprintln!("\nReceived Ctrl+C, shutting down...");
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Some(Command::ListCameras) => cli::list_cameras(),
        Some(Command::Config { ref action }) => {
            cli::handle_config_action(action.clone(), args.config.as_ref())
        }
        None => {
            let code = run(&args);
            if code != 0 {
                std::process::exit(code);
            }
        }
    }
}

/// Run the capture loop. Returns the process exit code.
fn run(args: &Args) -> i32 {
    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut settings = config.camera_settings();
    if let Some(index) = args.camera {
        settings.device_index = index;
    }
    if args.no_mirror {
        settings.mirror = false;
    }

    // Opening the camera is a startup precondition: no retry, print the
    // diagnostic and exit non-zero.
    let camera = match CameraCapture::open(settings) {
        Ok(camera) => camera,
        Err(e) => {
            eprint!("{}", cli::open_failure_diagnostic(&e));
            return 1;
        }
    };

    if let Err(e) = setup_ctrlc_handler() {
        eprintln!("Error: failed to install Ctrl+C handler: {}", e);
        return 1;
    }

    let mut session = CaptureSession::new(camera, PassthroughProcessor::new());

    let mut cycle: u64 = 0;
    while !ctrlc_received() {
        cycle += 1;

        if args.capture_at == Some(cycle) {
            log::info!("requesting capture on cycle {}", cycle);
            session.request_capture();
        }

        match session.get_one_frame() {
            Ok(bitmap) => {
                log::debug!("cycle {}: {}x{} preview frame", cycle, bitmap.width(), bitmap.height());
            }
            Err(e) => {
                log::error!("capture cycle {} failed: {}", cycle, e);
                session.release();
                return 1;
            }
        }

        if args.frames != 0 && cycle >= args.frames {
            break;
        }
    }

    log::info!("captured {} preview frame(s)", cycle);

    if let Some(path) = args.snapshot.as_ref() {
        match session.snapshot() {
            Some(snapshot) => {
                if let Err(e) = snapshot.save(path) {
                    eprintln!("Error: failed to write snapshot {}: {}", path.display(), e);
                    session.release();
                    return 1;
                }
                log::info!("snapshot written to {}", path.display());
            }
            None => {
                log::warn!("no capture was committed; snapshot not written");
            }
        }
    }

    session.release();
    0
}
