// src/compile/compile_loop.rs

//! Background compile loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::compile::CompileRequest;
use crate::compile::compiler::Compiler;
use crate::engine::{CompileOutcome, RuntimeEvent};

/// Spawn the background compile loop.
///
/// The returned `mpsc::Sender<CompileRequest>` is what the runtime (or
/// `RealCompileBackend`) dispatches through. Each request is compiled on its
/// own blocking task, so renders for distinct paths run concurrently; the
/// outcome for every path is reported back to the runtime independently as a
/// `CompileFinished` event, success or failure alike.
pub fn spawn_compiler(
    compiler: Arc<Compiler>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> mpsc::Sender<CompileRequest> {
    let (tx, mut rx) = mpsc::channel::<CompileRequest>(32);

    tokio::spawn(async move {
        info!("compile loop started");

        while let Some(request) = rx.recv().await {
            let compiler = Arc::clone(&compiler);
            let rt_tx = runtime_tx.clone();

            tokio::spawn(async move {
                let path = request.path.clone();
                let result = tokio::task::spawn_blocking({
                    let compiler = Arc::clone(&compiler);
                    let path = path.clone();
                    move || compiler.compile(&path)
                })
                .await;

                let outcome = match result {
                    Ok(Ok(output)) => {
                        info!(
                            template = %path.display(),
                            output = %output.display(),
                            "compiled"
                        );
                        CompileOutcome::Success
                    }
                    Ok(Err(err)) => {
                        warn!(template = %path.display(), "compile failed: {err}");
                        CompileOutcome::Failed(err.to_string())
                    }
                    Err(join_err) => {
                        warn!(template = %path.display(), "compile task panicked: {join_err}");
                        CompileOutcome::Failed(format!("compile task panicked: {join_err}"))
                    }
                };

                let _ = rt_tx
                    .send(RuntimeEvent::CompileFinished { path, outcome })
                    .await;
            });
        }

        info!("compile loop finished (channel closed)");
    });

    tx
}
