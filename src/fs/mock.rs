// src/fs/mock.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use globset::GlobSet;

use super::{FileSystem, relative_str};

#[derive(Debug, Clone)]
enum MockEntry {
    File(String),
    /// Present in listings but fails on read, for exercising the
    /// degrade-to-no-dependencies policy.
    Unreadable,
}

/// In-memory filesystem for tests.
///
/// Cloning shares the underlying storage, so a test can hand a clone to the
/// code under test and keep inspecting writes through its own handle.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.as_ref().to_path_buf(), MockEntry::File(content.into()));
    }

    pub fn add_unreadable(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.as_ref().to_path_buf(), MockEntry::Unreadable);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(path.as_ref());
    }

    /// Content of `path` if it was written/added as a regular file.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path.as_ref()) {
            Some(MockEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Unreadable) => Err(anyhow!("permission denied: {:?}", path)),
            None => Err(anyhow!("file not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let text = String::from_utf8(contents.to_vec())
            .map_err(|e| anyhow!("invalid UTF-8 written to {:?}: {e}", path))?;
        self.add_file(path, text);
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.contains_key(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // Tests use absolute, already-normalized paths.
        Ok(path.to_path_buf())
    }

    fn list_files(&self, root: &Path, matcher: &GlobSet) -> Result<Vec<PathBuf>> {
        let entries = self.entries.lock().unwrap();

        let mut found_root = false;
        let mut out = Vec::new();
        for path in entries.keys() {
            if let Some(rel) = relative_str(root, path) {
                found_root = true;
                if matcher.is_match(&rel) {
                    out.push(path.clone());
                }
            }
        }

        // Mirror the real filesystem: listing a directory that doesn't exist
        // is an error, not an empty result.
        if !found_root {
            return Err(anyhow!("no such directory: {:?}", root));
        }

        Ok(out)
    }
}
