//! gesture-pointer - hand-gesture pointer control
//!
//! Entry point for the control binary. Reads hand landmarks from a detector
//! stream and drives the system pointer.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gesture_pointer::config::{parse_screen_size, Config, ConfigOverrides};
use gesture_pointer::control::GestureController;
use gesture_pointer::session::run_session_with;
use gesture_pointer::sink::{LoggingSink, PointerSink};
use gesture_pointer::source::{open_source, LandmarkSource, LatestFrameStage};
use gesture_pointer::utils::{format_user_error, log_startup_diagnostics};

/// Screen size assumed when nothing better is known
const FALLBACK_SCREEN: (u32, u32) = (1920, 1080);

/// Command-line arguments for gesture-pointer
#[derive(Parser, Debug)]
#[command(name = "gesture-pointer")]
#[command(version, about = "Hand-gesture pointer control", long_about = None)]
pub struct Args {
    /// Configuration file path [default: $XDG_CONFIG_HOME/gesture-pointer/config.toml]
    #[arg(short, long, env = "GESTURE_POINTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Landmark stream (NDJSON), "-" for stdin
    #[arg(short, long, env = "GESTURE_POINTER_INPUT")]
    pub input: Option<String>,

    /// Smoothing factor (> 1)
    #[arg(long)]
    pub smoothing: Option<f64>,

    /// Pinch distance below which a click fires (camera pixels)
    #[arg(long)]
    pub click_threshold: Option<f64>,

    /// Margin excluded from each side of the camera frame (pixels)
    #[arg(long)]
    pub margin: Option<f64>,

    /// Screen size as WIDTHxHEIGHT (probed from the display if omitted)
    #[arg(long, value_parser = parse_screen_size)]
    pub screen: Option<(u32, u32)>,

    /// Do not mirror cursor moves horizontally
    #[arg(long)]
    pub no_mirror: bool,

    /// Clamp the cursor to the screen instead of extrapolating
    #[arg(long)]
    pub clamp: bool,

    /// Log pointer actions instead of injecting them
    #[arg(long)]
    pub dry_run: bool,

    /// Keep only the newest frame when the stream outpaces processing
    #[arg(long)]
    pub drop_stale: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            smoothing: self.smoothing,
            click_threshold: self.click_threshold,
            margin: self.margin,
            screen: self.screen,
            no_mirror: self.no_mirror,
            clamp: self.clamp,
            dry_run: self.dry_run,
            drop_stale: self.drop_stale,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(&args)?;

    info!("════════════════════════════════════════════════════════");
    info!("  gesture-pointer v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {} {}", env!("BUILD_DATE"), env!("BUILD_TIME"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("════════════════════════════════════════════════════════");

    log_startup_diagnostics();

    if let Err(e) = run(&args) {
        eprintln!("{}", format_user_error(&e));
        return Err(e);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?.with_overrides(&args.overrides());
    config.validate()?;

    info!("Configuration loaded successfully");
    debug!("Config: {:?}", config);

    let (mut sink, (screen_width, screen_height)) = open_pointer(&config)?;

    let settings = config.controller_settings(screen_width, screen_height);
    let mut controller =
        GestureController::new(settings).context("Invalid control settings in config")?;

    let mut source = open_landmarks(&config)?;

    let stats = run_session_with(
        source.as_mut(),
        sink.as_mut(),
        &mut controller,
        config.session_options(),
    )
    .context("Control session failed")?;

    info!("Session stats: {}", serde_json::to_string(&stats)?);
    info!("gesture-pointer shut down");
    Ok(())
}

/// Pointer sink plus the screen size to map onto
#[cfg(feature = "os-input")]
fn open_pointer(config: &Config) -> Result<(Box<dyn PointerSink>, (u32, u32))> {
    use gesture_pointer::sink::EnigoSink;

    if config.pointer.dry_run {
        info!("Dry run: pointer actions are logged, not injected");
        return Ok((Box::new(LoggingSink::new()), dry_run_screen(config)));
    }

    let sink = EnigoSink::new().context("Failed to open the system pointer for injection")?;
    let screen = match config.screen.size() {
        Some(size) => size,
        None => sink
            .screen_size()
            .context("Failed to probe the display size for pointer mapping")?,
    };
    info!("Pointer output: system ({}x{})", screen.0, screen.1);

    Ok((Box::new(sink), screen))
}

#[cfg(not(feature = "os-input"))]
fn open_pointer(config: &Config) -> Result<(Box<dyn PointerSink>, (u32, u32))> {
    if !config.pointer.dry_run {
        warn!("Built without the os-input feature; pointer actions are only logged");
    }
    Ok((Box::new(LoggingSink::new()), dry_run_screen(config)))
}

fn dry_run_screen(config: &Config) -> (u32, u32) {
    config.screen.size().unwrap_or_else(|| {
        warn!(
            "No screen size configured, assuming {}x{}",
            FALLBACK_SCREEN.0, FALLBACK_SCREEN.1
        );
        FALLBACK_SCREEN
    })
}

fn open_landmarks(config: &Config) -> Result<Box<dyn LandmarkSource>> {
    let source = open_source(&config.source.path)
        .with_context(|| format!("Failed to open landmark input: {}", config.source.path))?;

    if config.source.drop_stale_frames {
        let stage = LatestFrameStage::spawn(source)
            .context("Failed to start landmark capture thread")?;
        info!("Latest-frame stage enabled: stale frames are dropped");
        Ok(Box::new(stage))
    } else {
        Ok(source)
    }
}

fn init_logging(args: &Args) -> Result<Option<WorkerGuard>> {
    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "gesture_pointer={level},warn",
            level = log_level
        ))
    });

    let mut guard = None;
    let file_writer = match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, worker_guard) = tracing_appender::non_blocking(file);
            guard = Some(worker_guard);
            Some(writer)
        }
        None => None,
    };

    // Same position in every arm below; its subscriber type depends on it
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
    });

    // Console logs go to stderr
    match args.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    if let Some(path) = &args.log_file {
        info!("Logging to file: {}", path.display());
    }

    Ok(guard)
}
