// src/engine/runtime.rs

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::compile::{CompileBackend, CompileRequest};
use crate::config::model::ConfigSection;
use crate::engine::core::CoordinatorCore;
use crate::engine::scan::ProjectScanner;
use crate::graph::is_partial;
use crate::watch::WatchGuard;

/// Result of a compile attempt for a single template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Success,
    Failed(String),
}

/// Events sent into the runtime from the watcher, the compile loop, or
/// external signals.
///
/// The idea is that:
/// - the watcher sends `FileChanged` / `FileAdded` / `FileRemoved`
/// - startup wiring sends `StartRequested` / `CompileAllRequested`
/// - the compile loop sends `CompileFinished`
/// - Ctrl-C handling sends `ShutdownRequested`
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    StartRequested,
    StopRequested,
    CompileAllRequested,
    FileChanged(PathBuf),
    FileAdded(PathBuf),
    FileRemoved(PathBuf),
    CompileFinished {
        path: PathBuf,
        outcome: CompileOutcome,
    },
    ShutdownRequested,
}

/// Options that influence how the runtime behaves.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// If true, exit as soon as no compiles are in flight. Used for `--once`
    /// mode; in watch mode this should be `false`.
    pub exit_when_idle: bool,
}

/// Factory for watch subscriptions, invoked on every `Stopped → Running`
/// transition. Dropping the returned guard releases the subscription.
pub type WatcherSpawner = Box<dyn FnMut() -> Result<Box<dyn WatchGuard>> + Send>;

/// The main orchestration runtime.
///
/// Responsibilities:
/// - Consume `RuntimeEvent`s from the watcher/compile loop/ctrl-c.
/// - Drive the pure [`CoordinatorCore`] (graph + state machine).
/// - Perform the IO around it: reading files for edge extraction, holding
///   the watch subscription, dispatching compile requests.
///
/// Events are handled one at a time, which serializes all graph access; the
/// compiles they fan out to run concurrently and report back as events.
pub struct Runtime<B: CompileBackend> {
    core: CoordinatorCore,
    scanner: ProjectScanner,
    config: ConfigSection,
    options: RuntimeOptions,

    /// Unified event stream from all producers.
    events_rx: mpsc::Receiver<RuntimeEvent>,

    /// Backend the planned templates are dispatched through.
    backend: B,

    watcher_spawner: WatcherSpawner,
    _watcher: Option<Box<dyn WatchGuard>>,

    /// Compiles dispatched but not yet reported back.
    in_flight: usize,
}

impl<B: CompileBackend> Runtime<B> {
    pub fn new(
        core: CoordinatorCore,
        scanner: ProjectScanner,
        config: ConfigSection,
        options: RuntimeOptions,
        events_rx: mpsc::Receiver<RuntimeEvent>,
        backend: B,
        watcher_spawner: WatcherSpawner,
    ) -> Self {
        Self {
            core,
            scanner,
            config,
            options,
            events_rx,
            backend,
            watcher_spawner,
            _watcher: None,
            in_flight: 0,
        }
    }

    /// Core state, exposed for tests.
    pub fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    /// Number of dispatched-but-unreported compiles, exposed for tests.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Main event loop.
    pub async fn run(mut self) -> Result<()> {
        info!("livetpl runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            if !self.handle_event(event).await? {
                break;
            }
        }

        info!("livetpl runtime exiting");
        Ok(())
    }

    /// Handle a single event; returns whether the loop should keep running.
    ///
    /// Public so tests can drive the runtime step by step without channels.
    pub async fn handle_event(&mut self, event: RuntimeEvent) -> Result<bool> {
        match event {
            RuntimeEvent::StartRequested => {
                self.handle_start();
                Ok(true)
            }
            RuntimeEvent::StopRequested => {
                self.handle_stop();
                Ok(true)
            }
            RuntimeEvent::CompileAllRequested => self.handle_compile_all().await,
            RuntimeEvent::FileChanged(path) => {
                self.handle_file_changed(path).await?;
                Ok(true)
            }
            RuntimeEvent::FileAdded(path) => {
                self.handle_file_added(path);
                Ok(true)
            }
            RuntimeEvent::FileRemoved(path) => {
                self.handle_file_removed(path);
                Ok(true)
            }
            RuntimeEvent::CompileFinished { path, outcome } => {
                Ok(self.handle_compile_finished(path, outcome))
            }
            RuntimeEvent::ShutdownRequested => {
                info!("shutdown requested, stopping runtime");
                Ok(false)
            }
        }
    }

    /// `Stopped → Running`: full-tree scan, then subscribe to watch events.
    ///
    /// Enumeration failure is fatal to the start operation: no partial graph
    /// is left behind and the state stays `Stopped`. A later start request
    /// retries from scratch.
    fn handle_start(&mut self) {
        if self.core.is_running() {
            debug!("start requested but already running; no-op");
            return;
        }

        let scanned = match self.scanner.scan_all() {
            Ok(scanned) => scanned,
            Err(err) => {
                error!("full-tree scan failed, compiler remains stopped: {err:#}");
                return;
            }
        };

        let template_count = scanned.len();
        self.core.start(scanned);

        match (self.watcher_spawner)() {
            Ok(guard) => {
                self._watcher = Some(guard);
                info!(templates = template_count, "dependency graph built, watching");
            }
            Err(err) => {
                error!("failed to subscribe to file watch, stopping again: {err:#}");
                self.core.stop();
            }
        }
    }

    /// `Running → Stopped`: release the watch subscription.
    fn handle_stop(&mut self) {
        if self.core.stop() {
            self._watcher = None;
            info!("stopped watching");
        } else {
            debug!("stop requested but already stopped; no-op");
        }
    }

    async fn handle_file_changed(&mut self, path: PathBuf) -> Result<()> {
        if !self.core.is_running() {
            debug!(file = %path.display(), "change event while stopped; ignoring");
            return Ok(());
        }

        let edges = self.scanner.scan_edges(&path);
        let plan = self.core.file_changed(path.clone(), edges);

        if plan.is_empty() {
            info!(file = %path.display(), "changed, no root templates affected");
            return Ok(());
        }

        info!(
            file = %path.display(),
            count = plan.len(),
            "changed, recompiling affected root templates"
        );
        self.dispatch(plan).await
    }

    fn handle_file_added(&mut self, path: PathBuf) {
        if !self.core.is_running() {
            debug!(file = %path.display(), "add event while stopped; ignoring");
            return;
        }

        let edges = self.scanner.scan_edges(&path);
        debug!(file = %path.display(), edges = edges.len(), "added to dependency graph");
        self.core.file_added(path, edges);
    }

    fn handle_file_removed(&mut self, path: PathBuf) {
        if !self.core.is_running() {
            debug!(file = %path.display(), "remove event while stopped; ignoring");
            return;
        }

        self.core.file_removed(&path);
        debug!(file = %path.display(), "removed from dependency graph");
    }

    /// Compile every currently discovered root template, unconditionally.
    ///
    /// Valid in either state and independent of the graph: this is a flat
    /// iteration over enumeration, not a planner walk.
    async fn handle_compile_all(&mut self) -> Result<bool> {
        let files = match self.scanner.enumerate() {
            Ok(files) => files,
            Err(err) => {
                error!("compile-all enumeration failed: {err:#}");
                if self.options.exit_when_idle {
                    return Err(err);
                }
                return Ok(true);
            }
        };

        let targets: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| !self.config.exclude_partials || !is_partial(path))
            .collect();

        info!(count = targets.len(), "compile-all");
        self.dispatch(targets).await?;

        if self.options.exit_when_idle && self.in_flight == 0 {
            info!("nothing to compile and exit_when_idle=true, stopping");
            return Ok(false);
        }
        Ok(true)
    }

    fn handle_compile_finished(&mut self, path: PathBuf, outcome: CompileOutcome) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            CompileOutcome::Success => {
                debug!(template = %path.display(), "compile finished");
            }
            CompileOutcome::Failed(message) => {
                // Already logged by the compile loop; repeated here so the
                // outcome is visible even with a quiet compile loop.
                warn!(template = %path.display(), "compile failed: {message}");
            }
        }

        if self.options.exit_when_idle && self.in_flight == 0 {
            info!("all compiles finished and exit_when_idle=true, stopping");
            return false;
        }
        true
    }

    /// Send one compile request per planned path to the backend.
    async fn dispatch(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Result<()> {
        let requests: Vec<CompileRequest> = paths
            .into_iter()
            .map(|path| CompileRequest { path })
            .collect();

        if requests.is_empty() {
            return Ok(());
        }

        self.in_flight += requests.len();
        self.backend.dispatch(requests).await?;
        Ok(())
    }
}
