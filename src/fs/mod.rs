// src/fs/mod.rs

//! Filesystem abstraction.
//!
//! The engine and compiler talk to a [`FileSystem`] trait object instead of
//! `std::fs` directly, so tests can run against an in-memory mock
//! ([`mock::MockFileSystem`]) without touching disk.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::GlobSet;

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn is_file(&self, path: &Path) -> bool;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Recursively list files under `root` whose root-relative path (forward
    /// slashes) matches `matcher`. Dot-directories and dot-files are skipped.
    fn list_files(&self, root: &Path, matcher: &GlobSet) -> Result<Vec<PathBuf>>;
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    fn walk(
        &self,
        root: &Path,
        dir: &Path,
        matcher: &GlobSet,
        out: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for entry in fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))? {
            let entry = entry.with_context(|| format!("reading dir entry in {:?}", dir))?;
            let path = entry.path();

            if is_hidden(&path) {
                continue;
            }

            if path.is_dir() {
                self.walk(root, &path, matcher, out)?;
            } else if let Some(rel) = relative_str(root, &path) {
                if matcher.is_match(&rel) {
                    out.push(path);
                }
            }
        }
        Ok(())
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(path, contents).with_context(|| format!("writing to file {:?}", path))?;
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }

    fn list_files(&self, root: &Path, matcher: &GlobSet) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        self.walk(root, root, matcher, &mut out)?;
        out.sort();
        Ok(out)
    }
}
