//! Directory fixtures with backdated files

use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// Reference time passed as `--now` to every run
pub const NOW_RFC3339: &str = "2024-01-01T00:00:00Z";

pub fn now() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_704_067_200)
}

/// A temporary directory holding rotated files and a config
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory holding the rotated files
    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    /// Create `data/<name>` with an mtime `age` before `now()`
    pub fn file_aged(&self, name: &str, age: Duration) -> PathBuf {
        let path = self.data_dir().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, name.as_bytes()).unwrap();
        set_file_mtime(&path, FileTime::from_system_time(now() - age)).unwrap();
        path
    }

    /// Create one `snap-<hours>h.bak` file per age in hours
    pub fn snapshots(&self, hours: &[u64]) {
        for h in hours {
            self.file_aged(&format!("snap-{:03}h.bak", h), Duration::from_secs(h * 3600));
        }
    }

    /// Hours of the snapshot files still present, ascending
    pub fn remaining_snapshots(&self) -> Vec<u64> {
        let mut hours: Vec<u64> = fs::read_dir(self.data_dir())
            .unwrap()
            .filter_map(|e| {
                let name = e.unwrap().file_name().to_string_lossy().to_string();
                name.strip_prefix("snap-")?.strip_suffix("h.bak")?.parse().ok()
            })
            .collect();
        hours.sort_unstable();
        hours
    }

    /// Write a config whose path directive points at `data/<glob>`
    pub fn config(&self, glob: &str, range_lines: &[&str]) -> PathBuf {
        let mut text = format!("path:{}/{}\n", self.data_dir().display(), glob);
        for line in range_lines {
            text.push_str(line);
            text.push('\n');
        }
        self.raw_config(&text)
    }

    /// Write a config verbatim
    pub fn raw_config(&self, text: &str) -> PathBuf {
        let path = self.root().join("rotate.conf");
        fs::write(&path, text).unwrap();
        path
    }
}
