// src/compile/backend.rs

//! Pluggable compile backend abstraction.
//!
//! The runtime talks to a `CompileBackend` instead of a raw mpsc sender.
//! This makes it easy to swap in a recording backend in tests while keeping
//! the production compile loop in [`compile_loop`](crate::compile::compile_loop).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::compile::CompileRequest;
use crate::compile::compile_loop::spawn_compiler;
use crate::compile::compiler::Compiler;
use crate::engine::RuntimeEvent;
use crate::errors::Result;

/// Trait abstracting how planned templates are compiled.
///
/// Production code uses [`RealCompileBackend`]; tests can provide their own
/// implementation that records requests instead of rendering.
pub trait CompileBackend: Send {
    /// Dispatch the given requests for compilation.
    fn dispatch(
        &mut self,
        requests: Vec<CompileRequest>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real compile backend used in production.
///
/// Internally, this just wraps the compile loop in [`spawn_compiler`]. The
/// runtime calls `dispatch`, which forwards the requests to the background
/// loop via an mpsc channel.
pub struct RealCompileBackend {
    tx: mpsc::Sender<CompileRequest>,
}

impl RealCompileBackend {
    /// Create a new real compile backend, wiring it to the given runtime
    /// event sender.
    ///
    /// This spawns the background compile loop immediately.
    pub fn new(compiler: Arc<Compiler>, runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        let tx = spawn_compiler(compiler, runtime_tx);
        Self { tx }
    }
}

impl CompileBackend for RealCompileBackend {
    fn dispatch(
        &mut self,
        requests: Vec<CompileRequest>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            for request in requests {
                tx.send(request).await.map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
