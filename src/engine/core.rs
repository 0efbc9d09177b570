// src/engine/core.rs

//! Pure coordinator core state machine.
//!
//! This module contains a synchronous, deterministic core that owns the
//! dependency graph and the Stopped/Running state, and answers one question
//! per event: which root templates must be recompiled?
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - reading files and extracting references
//! - dispatching compile requests and holding the watch subscription
//!
//! The core can be unit tested without any Tokio, channels, filesystem, or
//! rendering. Because the shell processes events one at a time, graph reads
//! and writes are mutually exclusive by construction: a reverse-dependency
//! walk can never observe a partially updated edge set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::graph::{DepGraph, plan_recompile};

/// Coordinator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Stopped,
    Running,
}

/// One template discovered by a full-tree scan, with its resolved forward
/// edges.
#[derive(Debug, Clone)]
pub struct ScannedTemplate {
    pub path: PathBuf,
    pub edges: BTreeSet<PathBuf>,
}

/// The coordinator core: state machine plus the dependency graph it owns.
///
/// The graph's lifecycle is tied to the `Running` state: `start` populates it
/// wholesale from a full-tree scan and `stop` discards it.
#[derive(Debug, Default)]
pub struct CoordinatorCore {
    state: CoordinatorState,
    graph: DepGraph,
}

impl CoordinatorCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CoordinatorState::Running
    }

    pub fn graph(&self) -> &DepGraph {
        &self.graph
    }

    /// `Stopped → Running` with a fully populated graph.
    ///
    /// Returns `false` (and changes nothing) when already running. The caller
    /// only invokes this after a *successful* full scan, so a failed scan
    /// leaves the core exactly as it was.
    pub fn start(&mut self, scanned: Vec<ScannedTemplate>) -> bool {
        if self.is_running() {
            return false;
        }

        let mut graph = DepGraph::new();
        for template in scanned {
            graph.set_edges(template.path, template.edges);
        }

        self.graph = graph;
        self.state = CoordinatorState::Running;
        true
    }

    /// `Running → Stopped`, discarding the graph.
    ///
    /// Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.graph = DepGraph::new();
        self.state = CoordinatorState::Stopped;
        true
    }

    /// A watched file changed: overwrite its forward edges and plan the
    /// minimal recompilation set.
    ///
    /// Events arriving while stopped are ignored (empty plan).
    pub fn file_changed(
        &mut self,
        path: PathBuf,
        edges: BTreeSet<PathBuf>,
    ) -> BTreeSet<PathBuf> {
        if !self.is_running() {
            return BTreeSet::new();
        }
        self.graph.set_edges(path.clone(), edges);
        plan_recompile(&self.graph, &path)
    }

    /// A watched file appeared: record its forward edges. Addition alone
    /// never triggers compilation.
    pub fn file_added(&mut self, path: PathBuf, edges: BTreeSet<PathBuf>) {
        if !self.is_running() {
            return;
        }
        self.graph.set_edges(path, edges);
    }

    /// A watched file vanished: drop its node. Edges pointing at it are left
    /// in place. No compilation is triggered.
    pub fn file_removed(&mut self, path: &Path) {
        if !self.is_running() {
            return;
        }
        self.graph.remove_node(path);
    }
}
