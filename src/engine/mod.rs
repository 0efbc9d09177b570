// src/engine/mod.rs

//! Change coordination engine.
//!
//! This module ties together:
//! - the pure coordinator core: the Stopped/Running state machine that owns
//!   the dependency graph and turns file mutations into recompilation plans
//!   (`core.rs`)
//! - project scanning: enumeration plus extract+resolve for a single file
//!   (`scan.rs`)
//! - the async runtime event loop that reacts to watch events, control
//!   requests and compile outcomes (`runtime.rs`)

pub mod core;
pub mod runtime;
pub mod scan;

pub use core::{CoordinatorCore, CoordinatorState, ScannedTemplate};
pub use runtime::{CompileOutcome, Runtime, RuntimeEvent, RuntimeOptions, WatcherSpawner};
pub use scan::ProjectScanner;
