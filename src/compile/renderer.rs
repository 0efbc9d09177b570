// src/compile/renderer.rs

//! Template rendering behind a trait boundary.
//!
//! The engine treats rendering as an external collaborator: content in,
//! output string (or failure) out. [`TeraRenderer`] is the production
//! implementation; tests substitute recording fakes.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tera::Tera;
use tracing::{debug, warn};

use crate::config::model::ConfigFile;
use crate::errors::CompileError;
use crate::fs::{FileSystem, relative_str};
use crate::graph::{ReferenceScanner, resolve_reference};
use crate::watch::patterns::TemplatePatterns;

/// Renders a single template's content to its output string.
///
/// Implementations must resolve include/extends directives against the same
/// directory-relative convention as the path resolver, and must not cache
/// parsed templates across calls: every call reflects the current on-disk
/// content of all transitively included files.
pub trait TemplateRenderer: Send + Sync + Debug {
    fn render(&self, path: &Path, content: &str) -> Result<String, CompileError>;
}

/// Metadata about the template being rendered, exposed to templates as
/// `_self`.
#[derive(Debug, Serialize)]
struct SelfContext {
    path: String,
    directory: String,
}

/// Tera-backed renderer.
///
/// A fresh `Tera` instance is built per render call and loaded with the
/// current content of every discovered template, which is what makes the
/// no-cache contract hold: nothing survives between calls. Directive
/// arguments are rewritten through the path resolver to the instance's
/// registered template names, so the renderer sees exactly the same edges as
/// the dependency graph.
#[derive(Debug)]
pub struct TeraRenderer {
    root: PathBuf,
    template_ext: String,
    patterns: TemplatePatterns,
    fs: Arc<dyn FileSystem>,
    scanner: ReferenceScanner,
    globals: tera::Context,
}

impl TeraRenderer {
    pub fn new(
        root: impl Into<PathBuf>,
        cfg: &ConfigFile,
        fs: Arc<dyn FileSystem>,
    ) -> anyhow::Result<Self> {
        let patterns = TemplatePatterns::from_config(&cfg.config)?;

        let mut globals = tera::Context::new();
        for (key, value) in &cfg.context {
            globals.insert(key.as_str(), value);
        }

        Ok(Self {
            root: root.into(),
            template_ext: cfg.config.template_ext.clone(),
            patterns,
            fs,
            scanner: ReferenceScanner::new(),
            globals,
        })
    }

    /// Registered template name for a path: root-relative, forward slashes.
    fn template_name(&self, path: &Path) -> Option<String> {
        relative_str(&self.root, path)
    }

    /// Point every directive at the name its target is registered under.
    ///
    /// References that resolve outside the project root are left untouched;
    /// they surface as ordinary unresolved-template render errors.
    fn rewrite(&self, file: &Path, content: &str) -> String {
        self.scanner.rewrite_references(content, |raw| {
            let resolved = resolve_reference(raw, file, &self.template_ext);
            self.template_name(&resolved)
        })
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, path: &Path, content: &str) -> Result<String, CompileError> {
        let files = self
            .fs
            .list_files(&self.root, self.patterns.glob_set())
            .map_err(|err| CompileError::Enumeration {
                message: format!("{err:#}"),
            })?;

        let target_name =
            self.template_name(path).ok_or_else(|| CompileError::Render {
                path: path.to_path_buf(),
                message: "template is outside the project root".to_string(),
            })?;

        let mut templates: Vec<(String, String)> = Vec::new();
        for file in &files {
            if file == path {
                // The caller hands us the current content for the target,
                // registered below.
                continue;
            }
            let Some(name) = self.template_name(file) else {
                continue;
            };
            match self.fs.read_to_string(file) {
                Ok(raw) => templates.push((name, self.rewrite(file, &raw))),
                Err(err) => {
                    // A sibling that vanished mid-render only matters if the
                    // target actually references it, in which case Tera
                    // reports the unresolved name.
                    warn!(file = %file.display(), "skipping unreadable template: {err:#}");
                }
            }
        }
        templates.push((target_name.clone(), self.rewrite(path, content)));

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|err| CompileError::Render {
                path: path.to_path_buf(),
                message: format_tera_error(&err),
            })?;

        let mut context = self.globals.clone();
        context.insert(
            "_self",
            &SelfContext {
                path: path.display().to_string(),
                directory: path
                    .parent()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_default(),
            },
        );

        debug!(template = %target_name, "rendering");
        tera.render(&target_name, &context)
            .map_err(|err| CompileError::Render {
                path: path.to_path_buf(),
                message: format_tera_error(&err),
            })
    }
}

/// Flatten a Tera error chain into one reportable message.
///
/// Tera's top-level errors are usually just "Failed to render ..."; the
/// interesting part (unknown template, syntax error position) lives in the
/// source chain.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error as _;

    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(err) = source {
        messages.push(err.to_string());
        source = err.source();
    }
    messages.join(": ")
}
