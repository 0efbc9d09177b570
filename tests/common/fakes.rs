// tests/common/fakes.rs

//! Test doubles for the engine's collaborator traits.

#![allow(dead_code)]

use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use livetpl::compile::{CompileBackend, CompileRequest, TemplateRenderer};
use livetpl::errors::CompileError;
use livetpl::watch::WatchGuard;

/// Renderer that records every call and can be told to fail for specific
/// paths. Successful renders return a marker string so output files are easy
/// to assert on.
#[derive(Debug, Default)]
pub struct FakeRenderer {
    rendered: Mutex<Vec<PathBuf>>,
    failing: Mutex<HashSet<PathBuf>>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, path: impl AsRef<Path>) {
        self.failing
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    pub fn rendered(&self) -> Vec<PathBuf> {
        self.rendered.lock().unwrap().clone()
    }
}

impl TemplateRenderer for FakeRenderer {
    fn render(&self, path: &Path, _content: &str) -> Result<String, CompileError> {
        self.rendered.lock().unwrap().push(path.to_path_buf());

        if self.failing.lock().unwrap().contains(path) {
            return Err(CompileError::Render {
                path: path.to_path_buf(),
                message: "injected render failure".to_string(),
            });
        }
        Ok(format!("rendered {}", path.display()))
    }
}

/// Backend that records dispatched requests instead of compiling them.
///
/// The shared `Vec` handle lets a test keep inspecting dispatches after the
/// backend has been moved into the runtime.
pub struct RecordingBackend {
    requests: Arc<Mutex<Vec<CompileRequest>>>,
}

impl RecordingBackend {
    pub fn new() -> (Self, Arc<Mutex<Vec<CompileRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                requests: Arc::clone(&requests),
            },
            requests,
        )
    }
}

impl CompileBackend for RecordingBackend {
    fn dispatch(
        &mut self,
        requests: Vec<CompileRequest>,
    ) -> Pin<Box<dyn Future<Output = livetpl::errors::Result<()>> + Send + '_>> {
        let sink = Arc::clone(&self.requests);
        Box::pin(async move {
            sink.lock().unwrap().extend(requests);
            Ok(())
        })
    }
}

/// Watch guard that holds nothing; tests don't watch a real filesystem.
#[derive(Debug)]
pub struct NoopWatchGuard;

impl WatchGuard for NoopWatchGuard {}
