//! Terminal output formatting.
//!
//! Text mode prints colored, indented lines. JSON mode suppresses them and
//! prints one JSON document per command on stdout.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

fn text_suppressed() -> bool {
    let config = read_config();
    config.json || config.quiet
}

/// Print the application header with name and version.
pub fn header() {
    if text_suppressed() {
        return;
    }
    println!("{} {}", "planar-lp".bold(), env!("CARGO_PKG_VERSION").dimmed());
    println!();
}

/// Print a section header.
pub fn section(title: &str) {
    if text_suppressed() {
        return;
    }
    println!("  {}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if text_suppressed() {
        return;
    }
    println!("    {:<12} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if text_suppressed() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line. Shown in quiet mode too.
pub fn warning(message: &str) {
    if is_json() {
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print a pre-rendered block (such as a table), indented.
pub fn block(text: &str) {
    if text_suppressed() {
        return;
    }
    for line in text.lines() {
        println!("    {line}");
    }
}

/// Print an empty line.
pub fn blank() {
    if text_suppressed() {
        return;
    }
    println!();
}

/// Emit one JSON document on stdout, in JSON mode only.
pub fn document(value: &serde_json::Value) {
    if is_json() {
        println!("{value}");
    }
}

/// Format a coordinate or value for display, rounded to two decimals.
#[must_use]
pub fn round2(value: f64) -> String {
    // Adding 0.0 avoids printing "-0.00".
    format!("{:.2}", (value * 100.0).round() / 100.0 + 0.0)
}
