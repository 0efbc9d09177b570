// src/compile/compiler.rs

//! Read → render → write pipeline for a single template.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compile::output::output_path;
use crate::compile::renderer::TemplateRenderer;
use crate::config::model::ConfigSection;
use crate::errors::CompileError;
use crate::fs::FileSystem;

/// Compiles one root template from current on-disk content to its output
/// file.
///
/// The renderer reference is an atomic snapshot: the `Arc` taken at dispatch
/// time stays valid for the whole render even if the engine is reconfigured
/// mid-flight. A stale render that completes after a newer change is simply
/// overwritten by the next one (last-write-wins on the output file).
#[derive(Debug)]
pub struct Compiler {
    root: PathBuf,
    config: ConfigSection,
    fs: Arc<dyn FileSystem>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl Compiler {
    pub fn new(
        root: impl Into<PathBuf>,
        config: ConfigSection,
        fs: Arc<dyn FileSystem>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            fs,
            renderer,
        }
    }

    /// Compile `path`, returning the output path written.
    pub fn compile(&self, path: &Path) -> Result<PathBuf, CompileError> {
        let content =
            self.fs
                .read_to_string(path)
                .map_err(|err| CompileError::Read {
                    path: path.to_path_buf(),
                    message: format!("{err:#}"),
                })?;

        let rendered = self.renderer.render(path, &content)?;

        let out = output_path(&self.root, &self.config, path).ok_or_else(|| {
            CompileError::Write {
                path: path.to_path_buf(),
                message: "template is outside the project root".to_string(),
            }
        })?;

        self.fs
            .write(&out, rendered.as_bytes())
            .map_err(|err| CompileError::Write {
                path: out.clone(),
                message: format!("{err:#}"),
            })?;

        Ok(out)
    }
}
