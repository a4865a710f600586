//! Config and argument errors abort before anything is deleted

use crate::common::{TestTree, NOW_RFC3339};
use anyhow::Result;

#[test]
fn test_unknown_directive_reports_line() -> Result<()> {
    let tree = TestTree::new();
    tree.snapshots(&[0, 500]);
    let config = tree.raw_config("# header\npath:/tmp/*.bak\nkeep:1h:0\n");

    let result = crate::rotate!(
        tree.root(),
        "run", "--config", &config.display().to_string(), "--now", NOW_RFC3339
    )
    .assert_failure()?;

    assert!(result.contains_stderr("Error parsing config"));
    assert!(result.contains_stderr("line 3: unknown directive \"keep\""));
    assert_eq!(tree.remaining_snapshots(), vec![0, 500]);
    Ok(())
}

#[test]
fn test_descending_ranges_rejected() -> Result<()> {
    let tree = TestTree::new();
    let config = tree.config("*.bak", &["range:2h:0", "range:1h:0"]);

    let result = crate::rotate!(tree.root(), "check", "--config", &config.display().to_string())
        .assert_failure()?;

    assert!(result.contains_stderr("line 3: age 1h must be larger than previous age 2h"));
    Ok(())
}

#[test]
fn test_missing_config_file() -> Result<()> {
    let tree = TestTree::new();

    let result = crate::rotate!(tree.root(), "check", "--config", "does-not-exist.conf")
        .assert_failure()?;

    assert!(result.contains_stderr("does-not-exist.conf"));
    Ok(())
}

#[test]
fn test_bad_reference_time() -> Result<()> {
    let tree = TestTree::new();
    tree.snapshots(&[0, 500]);
    let config = tree.config("*.bak", &["range:1h:0"]);

    let result = crate::rotate!(
        tree.root(),
        "run", "--config", &config.display().to_string(), "--now", "last tuesday"
    )
    .assert_failure()?;

    assert!(result.contains_stderr("Invalid --now timestamp"));
    assert_eq!(tree.remaining_snapshots(), vec![0, 500]);
    Ok(())
}
