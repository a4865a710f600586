//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::DateTime;
use fileobject::Config;
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::SystemTime;

/// Load and validate a rotation config
pub fn load_config(path: &Path, field_sep: &str) -> Result<Config> {
    fileobject::config::load(path, field_sep)
        .with_context(|| format!("Error parsing config {}", path.display()))
}

/// Reference time for a run: the given RFC 3339 timestamp, or the clock
pub fn resolve_now(now: Option<&str>) -> Result<SystemTime> {
    match now {
        Some(text) => {
            let parsed = DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("Invalid --now timestamp: {}", text))?;
            Ok(parsed.into())
        }
        None => Ok(SystemTime::now()),
    }
}

/// Print the pattern and the ranges of a config
pub fn print_schedule(config: &Config) {
    println!("{}: {}", "Pattern".dimmed(), config.pattern.cyan());
    for (i, range) in config.ranges.iter().enumerate() {
        println!("  {}. {}", i + 1, range);
    }
    if let Some(last) = config.ranges.last() {
        let expiry = format!("Older than {} is deleted", humantime::format_duration(last.age));
        println!("  {}", expiry.dimmed());
    }
}
