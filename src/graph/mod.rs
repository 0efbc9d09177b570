// src/graph/mod.rs

//! Dependency tracking core.
//!
//! This module is the heart of livetpl:
//! - Turning raw include/extends references into absolute file paths
//!   (`resolve.rs`).
//! - Scanning template text for those references (`extract.rs`).
//! - Maintaining the forward-edge dependency graph over template files
//!   (`graph.rs`).
//! - Computing the minimal set of root templates to recompile when a file
//!   changes (`planner.rs`).
//!
//! It does **not** read files, watch the filesystem, or render anything; it
//! only works on paths and strings handed to it by the engine.

pub mod extract;
pub mod graph;
pub mod planner;
pub mod resolve;

pub use extract::ReferenceScanner;
pub use graph::DepGraph;
pub use planner::plan_recompile;
pub use resolve::{PARTIAL_MARKER, is_partial, normalize, resolve_reference};
