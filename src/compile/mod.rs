// src/compile/mod.rs

//! Template compilation.
//!
//! This module ties together:
//! - the [`TemplateRenderer`] trait and its Tera-backed implementation
//!   (`renderer.rs`)
//! - the read → render → write pipeline for a single template
//!   (`compiler.rs`, `output.rs`)
//! - the background compile loop and the backend abstraction the runtime
//!   dispatches through (`compile_loop.rs`, `backend.rs`)
//!
//! Each planned template is compiled independently; a failure for one path
//! never aborts the rest of a batch.

use std::path::PathBuf;

pub mod backend;
pub mod compile_loop;
pub mod compiler;
pub mod output;
pub mod renderer;

pub use backend::{CompileBackend, RealCompileBackend};
pub use compile_loop::spawn_compiler;
pub use compiler::Compiler;
pub use output::output_path;
pub use renderer::{TemplateRenderer, TeraRenderer};

/// A single template queued for compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub path: PathBuf,
}
