// src/engine/scan.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::model::ConfigSection;
use crate::engine::core::ScannedTemplate;
use crate::fs::FileSystem;
use crate::graph::{ReferenceScanner, resolve_reference};
use crate::watch::patterns::TemplatePatterns;

/// Enumerates template files and computes a single file's forward edges.
///
/// This is the IO-facing half of graph maintenance; the resulting edge sets
/// are handed to the pure [`CoordinatorCore`](crate::engine::CoordinatorCore).
#[derive(Debug, Clone)]
pub struct ProjectScanner {
    root: PathBuf,
    template_ext: String,
    patterns: TemplatePatterns,
    fs: Arc<dyn FileSystem>,
    scanner: ReferenceScanner,
}

impl ProjectScanner {
    pub fn new(
        root: impl Into<PathBuf>,
        cfg: &ConfigSection,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let patterns = TemplatePatterns::from_config(cfg)?;
        Ok(Self {
            root: root.into(),
            template_ext: cfg.template_ext.clone(),
            patterns,
            fs,
            scanner: ReferenceScanner::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every template file currently in the project.
    pub fn enumerate(&self) -> Result<Vec<PathBuf>> {
        self.fs
            .list_files(&self.root, self.patterns.glob_set())
            .with_context(|| format!("enumerating templates under {:?}", self.root))
    }

    /// Compute `path`'s forward edges from its current content.
    ///
    /// A read failure degrades to "no dependencies found" for this file: the
    /// failure is reported here and the caller proceeds, so one unreadable
    /// file never blocks discovery of the rest of the tree.
    pub fn scan_edges(&self, path: &Path) -> BTreeSet<PathBuf> {
        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    file = %path.display(),
                    "could not read template while scanning dependencies: {err:#}"
                );
                return BTreeSet::new();
            }
        };

        self.scanner
            .extract(&content)
            .into_iter()
            .map(|raw| resolve_reference(raw, path, &self.template_ext))
            .collect()
    }

    /// Full-tree scan: enumerate every template and compute its edges.
    ///
    /// Enumeration failure is fatal here (the caller must not be left with a
    /// half-built graph); per-file read failures degrade via
    /// [`ProjectScanner::scan_edges`].
    pub fn scan_all(&self) -> Result<Vec<ScannedTemplate>> {
        let files = self.enumerate()?;
        Ok(files
            .into_iter()
            .map(|path| {
                let edges = self.scan_edges(&path);
                ScannedTemplate { path, edges }
            })
            .collect())
    }
}
