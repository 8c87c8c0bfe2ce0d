//! Source file discovery
//!
//! Walks the input root and yields candidate Go files in deterministic order.
//! Filename filters apply to the file name only, never to the directory part.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::shared::models::{HandlergenError, Result};

/// Directory names never descended into
const SKIPPED_DIRS: &[&str] = &["testdata", "vendor"];

/// A discovered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,

    /// Path relative to the walk root, `/`-separated
    pub relative: String,
}

#[derive(Debug, Clone)]
pub struct SourceWalker {
    include: Regex,
    exclude: Regex,
    recursive: bool,
}

impl SourceWalker {
    pub fn new(include: Regex, exclude: Regex, recursive: bool) -> Self {
        Self {
            include,
            exclude,
            recursive,
        }
    }

    fn is_candidate(&self, file_name: &str) -> bool {
        !self.exclude.is_match(file_name) && self.include.is_match(file_name)
    }

    /// Discover files under `root`, sorted by name within each directory
    pub fn discover(&self, root: &Path) -> Result<Vec<SourceFile>> {
        if !root.is_dir() {
            return Err(HandlergenError::io(format!(
                "input directory does not exist: {}",
                root.display()
            )));
        }

        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        let entries = walker.into_iter().filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !name.starts_with('_') && !SKIPPED_DIRS.contains(&name.as_ref())
        });

        for entry in entries {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !self.is_candidate(&file_name) {
                debug!(file = %entry.path().display(), "Skipping file");
                continue;
            }

            files.push(SourceFile {
                relative: relative_path(root, entry.path()),
                path: entry.into_path(),
            });
        }

        debug!(count = files.len(), root = %root.display(), "Discovered source files");
        Ok(files)
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn walker(recursive: bool) -> SourceWalker {
        SourceWalker::new(
            Regex::new(r"^.*\.go$").unwrap(),
            Regex::new(r"^gen_.*\.go$").unwrap(),
            recursive,
        )
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package x\n").unwrap();
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.go");
        touch(dir.path(), "a.go");
        touch(dir.path(), "gen_http_api_handler.go");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "api/user.go");
        touch(dir.path(), "vendor/lib/lib.go");
        touch(dir.path(), ".git/hooks.go");
        touch(dir.path(), "_old/x.go");

        let files = walker(true).discover(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(names, vec!["a.go", "api/user.go", "b.go"]);
    }

    #[test]
    fn test_non_recursive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.go");
        touch(dir.path(), "api/user.go");

        let files = walker(false).discover(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, "a.go");
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(walker(true).discover(&missing).is_err());
    }
}
