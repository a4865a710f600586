//! Files selected by a path pattern
//!
//! A pattern is split into a literal base directory and a glob tail. The
//! tail is matched with gitignore semantics, anchored at the base: `*` and
//! `?` stay within one path component, `**` crosses directories. Braces are
//! literal. Only regular files are listed; symlinks are never followed.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use rotate_core::{age_since, Object, ObjectError, ObjectSource};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};
use walkdir::WalkDir;

const GLOB_CHARS: &[char] = &['*', '?', '['];

/// A file and its modification time
///
/// The mtime is read once at listing time so sorting and sweeping never go
/// back to the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    modified: SystemTime,
}

impl File {
    pub fn new(path: PathBuf, modified: SystemTime) -> Self {
        Self { path, modified }
    }

    /// Read the mtime of `path`
    pub fn stat(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self::new(path.to_path_buf(), metadata.modified()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

impl Object for File {
    fn age(&self, now: SystemTime) -> Duration {
        age_since(self.modified, now)
    }

    /// Remove the file; a file that is already gone counts as deleted
    fn delete(&self) -> Result<(), ObjectError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn id(&self) -> String {
        self.path.display().to_string()
    }
}

/// All files matching a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Files {
    pattern: String,
}

impl Files {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl ObjectSource for Files {
    type Object = File;

    fn id(&self) -> String {
        self.pattern.clone()
    }

    fn list(&self) -> Result<Vec<File>, ObjectError> {
        let (base, tail) = split_pattern(&self.pattern);

        let Some(tail) = tail else {
            return stat_single(&base);
        };

        if !base.is_dir() {
            debug!(base = %base.display(), "Pattern base is not a directory, nothing to list");
            return Ok(Vec::new());
        }

        let matcher = build_matcher(&base, &tail)?;
        let mut walker = WalkDir::new(&base).min_depth(1).follow_links(false);
        if !tail.contains("**") {
            walker = walker.max_depth(tail.split('/').count());
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_not_found(err.io_error()) => {
                    warn!("Entry vanished while listing: {}", err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let rel_path = entry.path().strip_prefix(&base).unwrap_or(entry.path());
            if !matcher.matched(rel_path, false).is_ignore() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) if is_not_found(err.io_error()) => continue,
                Err(err) => return Err(err.into()),
            };
            files.push(File::new(entry.into_path(), metadata.modified()?));
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(pattern = %self.pattern, count = files.len(), "Listed files");
        Ok(files)
    }
}

/// Split a pattern into its literal leading directory and the glob remainder
///
/// Returns no remainder when the pattern has no glob characters at all.
fn split_pattern(pattern: &str) -> (PathBuf, Option<String>) {
    let mut base = PathBuf::new();
    let mut tail: Vec<String> = Vec::new();

    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if tail.is_empty() && !text.contains(GLOB_CHARS) {
            base.push(component);
        } else {
            tail.push(text.into_owned());
        }
    }

    if tail.is_empty() {
        return (base, None);
    }
    if base.as_os_str().is_empty() {
        base.push(".");
    }
    (base, Some(tail.join("/")))
}

fn build_matcher(base: &Path, tail: &str) -> Result<Gitignore, ObjectError> {
    let mut builder = GitignoreBuilder::new(base);
    // braces are literal in patterns; the leading slash anchors to the base
    let tail = tail.replace('{', "\\{").replace('}', "\\}");
    builder.add_line(None, &format!("/{}", tail))?;
    Ok(builder.build()?)
}

fn stat_single(path: &Path) -> Result<Vec<File>, ObjectError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => {
            Ok(vec![File::new(path.to_path_buf(), metadata.modified()?)])
        }
        Ok(_) => Ok(Vec::new()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn is_not_found(err: Option<&io::Error>) -> bool {
    err.map_or(false, |e| e.kind() == io::ErrorKind::NotFound)
}
