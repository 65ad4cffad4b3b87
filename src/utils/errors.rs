//! User-Friendly Error Formatting
//!
//! Turns a top-level failure into a message with troubleshooting hints
//! for the common ways a session fails to start or dies.

use std::fmt::Write;

/// Format error for user consumption
///
/// Picks a category from the error chain and prints causes and fixes,
/// followed by the full technical chain.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    // Match against the whole chain, not just the outermost context
    let chain = format!("{:#}", error);
    let lowered = chain.to_lowercase();

    if lowered.contains("pointer") || lowered.contains("inject") || lowered.contains("display")
    {
        format_injection_error(&mut output);
    } else if lowered.contains("config") {
        format_config_error(&mut output);
    } else if lowered.contains("landmark") || lowered.contains("json") {
        format_source_error(&mut output);
    } else {
        format_generic_error(&mut output, &error.to_string());
    }

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", chain).ok();
    writeln!(&mut output).ok();

    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: gesture-pointer -vvv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Try --dry-run to check tracking without moving the cursor"
    )
    .ok();

    output
}

fn format_injection_error(output: &mut String) {
    writeln!(output, "Pointer Control Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not move or click the system pointer.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No display session reachable").ok();
    writeln!(output, "     → Check: echo $DISPLAY $WAYLAND_DISPLAY").ok();
    writeln!(output, "     → Run from inside the desktop session, not over SSH").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Input injection blocked by the session").ok();
    writeln!(
        output,
        "     → Pure Wayland sessions may refuse synthetic input"
    )
    .ok();
    writeln!(output, "     → Try an X11 or XWayland session").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Screen size could not be detected").ok();
    writeln!(output, "     → Pass it explicitly: --screen 1920x1080").ok();
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "The configuration could not be loaded or is invalid.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Out-of-range values").ok();
    writeln!(output, "     → smoothing.factor must be greater than 1").ok();
    writeln!(output, "     → click.threshold must not be negative").ok();
    writeln!(
        output,
        "     → region.margin must leave a non-empty area inside the camera frame"
    )
    .ok();
}

fn format_source_error(output: &mut String) {
    writeln!(output, "Landmark Input Error").ok();
    writeln!(output).ok();
    writeln!(output, "The hand landmark stream could not be read.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Input file missing or unreadable").ok();
    writeln!(output, "     → Check the path given to --input").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Detector process exited or closed its output").ok();
    writeln!(
        output,
        "     → Check the detector's own log; unreadable lines are skipped, read errors are not"
    )
    .ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Session Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while running the session.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}
