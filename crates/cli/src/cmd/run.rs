//! Apply a rotation config

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rotate_core::{cleanup, CleanupReport, DryRun, ObjectSource, Range};
use std::path::Path;
use std::time::SystemTime;
use tracing::info;

pub fn run(
    config_path: &Path,
    field_sep: &str,
    dry_run: bool,
    now: Option<&str>,
    json: bool,
) -> Result<()> {
    // 1. Load config
    let config = util::load_config(config_path, field_sep)?;

    // 2. Fix the reference time once for the whole run
    let now = util::resolve_now(now)?;
    info!(
        config = %config_path.display(),
        ranges = config.ranges.len(),
        dry_run,
        "Loaded rotation config"
    );

    // 3. Rotate
    let files = config.files();
    let report = if dry_run {
        rotate(&config.ranges, &DryRun::new(files), now)?
    } else {
        rotate(&config.ranges, &files, now)?
    };

    // 4. Display results
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    util::print_schedule(&config);
    println!();
    print_report(&report, dry_run);

    Ok(())
}

fn rotate<S: ObjectSource>(ranges: &[Range], source: &S, now: SystemTime) -> Result<CleanupReport> {
    cleanup(ranges, source, now).with_context(|| format!("Error doing cleanup of {}", source.id()))
}

fn print_report(report: &CleanupReport, dry_run: bool) {
    if dry_run {
        println!("{}", "Dry run - no files were deleted".yellow().bold());
    } else {
        println!("{}", "Rotation Complete".green().bold());
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if report.listed == 0 {
        println!("{}", "No files matched the pattern".dimmed());
        return;
    }

    let verb = if dry_run { "to delete" } else { "deleted" };
    println!("Files matched:       {}", report.listed);
    println!("Files kept:          {}", report.retained.to_string().green());
    println!("Thinned ({}):  {}", verb, report.swept.to_string().yellow());
    println!("Expired ({}):  {}", verb, report.overflow.to_string().yellow());
}
