//! Startup Diagnostics
//!
//! Host and display-session information logged at startup, so that
//! injection failures can be matched against the environment they
//! happened in.

use std::fmt;
use std::time::Duration;
use sysinfo::System;
use tracing::info;

/// Host information for diagnostics
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// Operating system name and version
    pub os: String,
    /// Kernel version string
    pub kernel_version: String,
    /// Number of logical CPU cores
    pub cpu_count: usize,
    /// Total system memory in megabytes
    pub total_memory_mb: u64,
}

impl SystemInfo {
    /// Gather host information
    pub fn gather() -> Self {
        let sys = System::new_all();

        let unknown = || "Unknown".to_string();
        Self {
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_default()
            )
            .trim()
            .to_string(),
            kernel_version: System::kernel_version().unwrap_or_else(unknown),
            cpu_count: sys.cpus().len(),
            total_memory_mb: sys.total_memory() / 1024 / 1024,
        }
    }

    /// Log host information
    pub fn log(&self) {
        info!("=== System Information ===");
        info!("  OS: {}", self.os);
        info!("  Kernel: {}", self.kernel_version);
        info!("  CPUs: {}", self.cpu_count);
        info!("  Memory: {} MB", self.total_memory_mb);
    }
}

/// Display session the pointer will be driven in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayServer {
    /// Wayland session (socket name)
    Wayland(String),
    /// X11 session (display name)
    X11(String),
    /// No display variables set
    Unknown,
}

impl DisplayServer {
    /// Detect from the process environment
    pub fn detect() -> Self {
        Self::detect_with(|key| std::env::var(key).ok())
    }

    /// Detect using `lookup` for environment variables
    pub fn detect_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(socket) = non_empty("WAYLAND_DISPLAY") {
            return Self::Wayland(socket);
        }
        if let Some(display) = non_empty("DISPLAY") {
            return Self::X11(display);
        }
        Self::Unknown
    }
}

impl fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wayland(socket) => write!(f, "Wayland ({})", socket),
            Self::X11(display) => write!(f, "X11 ({})", display),
            Self::Unknown => f.write_str("Unknown (no WAYLAND_DISPLAY or DISPLAY)"),
        }
    }
}

/// Format a duration as `HH:MM:SS`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Log complete diagnostics on startup
pub fn log_startup_diagnostics() {
    info!("╔════════════════════════════════════════════════════════════╗");
    info!("║          Startup Diagnostics                               ║");
    info!("╚════════════════════════════════════════════════════════════╝");

    SystemInfo::gather().log();

    info!("=== Environment ===");
    info!("  Display: {}", DisplayServer::detect());
    match std::env::var("XDG_CURRENT_DESKTOP") {
        Ok(desktop) if !desktop.is_empty() => info!("  Desktop: {}", desktop),
        _ => info!("  Desktop: Not reported"),
    }

    info!("=== Build ===");
    info!("  Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "  OS input injection: {}",
        if cfg!(feature = "os-input") {
            "enabled"
        } else {
            "disabled (dry run only)"
        }
    );
    #[cfg(debug_assertions)]
    info!("  Profile: debug");
    #[cfg(not(debug_assertions))]
    info!("  Profile: release");
}
