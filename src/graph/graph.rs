// src/graph/graph.rs

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Bidirectional-by-scan dependency graph over template file paths.
///
/// Each node stores only its forward edges (the files it directly includes or
/// extends, fully resolved to absolute paths). Reverse edges are computed on
/// demand by scanning every node's forward set: lookups cost O(total edges),
/// but updates stay trivially consistent because there is no second index to
/// keep in sync.
///
/// Dangling edges are fine: a node may point at a path that has no entry of
/// its own (a referenced file not yet discovered, or already deleted).
/// Removing a node never cascades into other nodes' edge sets.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    nodes: HashMap<PathBuf, BTreeSet<PathBuf>>,
}

impl DepGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `path`'s forward-edge set wholesale, creating the entry if
    /// absent. Edge recomputation is always whole-file; there is no partial
    /// edge update.
    pub fn set_edges(&mut self, path: PathBuf, forward_edges: BTreeSet<PathBuf>) {
        self.nodes.insert(path, forward_edges);
    }

    /// Delete `path`'s entry entirely.
    ///
    /// Other nodes' edges pointing at `path` are left in place, so
    /// [`DepGraph::reverse_dependents`] stays consistent for callers that
    /// still hold the removed path.
    pub fn remove_node(&mut self, path: &Path) {
        self.nodes.remove(path);
    }

    /// Every node whose forward-edge set contains `path`.
    pub fn reverse_dependents(&self, path: &Path) -> BTreeSet<PathBuf> {
        self.nodes
            .iter()
            .filter(|(_, edges)| edges.contains(path))
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Forward edges of `path`, if it has an entry.
    pub fn forward_edges(&self, path: &Path) -> Option<&BTreeSet<PathBuf>> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    /// All known node paths.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Path> {
        self.nodes.keys().map(|p| p.as_path())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
