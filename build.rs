//! Embeds build identification (date, time, commit) for the startup banner.

use std::process::Command;

/// Trimmed stdout of a command, if it ran and succeeded
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let stamps = [
        ("BUILD_DATE", command_output("date", &["+%Y-%m-%d"])),
        ("BUILD_TIME", command_output("date", &["+%H:%M:%S"])),
        ("GIT_HASH", command_output("git", &["rev-parse", "--short", "HEAD"])),
    ];

    for (key, value) in stamps {
        let value = value.unwrap_or_else(|| "unknown".to_string());
        println!("cargo:rustc-env={key}={value}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}
