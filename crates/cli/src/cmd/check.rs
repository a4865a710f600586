//! Validate a config without touching any files

use crate::util;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(config_path: &Path, field_sep: &str) -> Result<()> {
    let config = util::load_config(config_path, field_sep)?;

    println!("{} {}", "✓".green(), "Config is valid".bold());
    println!();
    util::print_schedule(&config);

    Ok(())
}
