// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Compiling the template files glob (`patterns.rs`).
//! - Wiring up a cross-platform filesystem watcher (`notify`) that turns raw
//!   notifications into `changed`/`added`/`removed` runtime events
//!   (`watcher.rs`).
//!
//! It does **not** know about the dependency graph or rendering; it only
//! turns filesystem changes into path-level events for the engine.

pub mod patterns;
pub mod watcher;

pub use patterns::TemplatePatterns;
pub use watcher::{WatchGuard, WatcherHandle, spawn_watcher};
