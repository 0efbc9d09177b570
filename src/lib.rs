// src/lib.rs

//! livetpl: watch a template tree and incrementally recompile the root
//! templates affected by each change.
//!
//! The crate is split into a pure core and an IO shell:
//!
//! - [`graph`] holds the dependency graph, reference extraction and path
//!   resolution; [`engine::CoordinatorCore`] is the Stopped/Running state
//!   machine over it. None of that touches the filesystem.
//! - [`engine::Runtime`] is the async event loop around the core. It reacts
//!   to watch events, control requests and compile outcomes, all delivered
//!   over one channel.
//! - [`compile`] renders templates (Tera) and writes output files; [`watch`]
//!   produces filesystem events (notify); [`fs`] abstracts disk access so
//!   tests can run in memory.

pub mod cli;
pub mod compile;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod logging;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::compile::backend::RealCompileBackend;
use crate::compile::compiler::Compiler;
use crate::compile::renderer::{TemplateRenderer, TeraRenderer};
use crate::engine::{
    CoordinatorCore, ProjectScanner, Runtime, RuntimeEvent, RuntimeOptions, WatcherSpawner,
};
use crate::fs::{FileSystem, RealFileSystem, relative_str};
use crate::watch::patterns::TemplatePatterns;
use crate::watch::{WatchGuard, spawn_watcher};

/// Entry point used by the binary after CLI parsing and logging setup.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let config = config::loader::load_and_validate(&config_path)?;
    let root = config_root_dir(&config_path)?;

    info!(root = %root.display(), "project root resolved");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let scanner = ProjectScanner::new(root.clone(), &config.config, Arc::clone(&fs))?;

    if args.dry_run {
        return dry_run(&scanner);
    }

    let renderer: Arc<dyn TemplateRenderer> =
        Arc::new(TeraRenderer::new(root.clone(), &config, Arc::clone(&fs))?);
    let compiler = Arc::new(Compiler::new(
        root.clone(),
        config.config.clone(),
        Arc::clone(&fs),
        renderer,
    ));

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let backend = RealCompileBackend::new(compiler, rt_tx.clone());

    let patterns = TemplatePatterns::from_config(&config.config)?;
    let watcher_spawner: WatcherSpawner = {
        let root = root.clone();
        let tx = rt_tx.clone();
        Box::new(move || {
            let handle = spawn_watcher(root.clone(), patterns.clone(), tx.clone())?;
            Ok(Box::new(handle) as Box<dyn WatchGuard>)
        })
    };

    // Ctrl-C becomes an ordinary runtime event.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
            }
        });
    }

    // Seed the event loop: always one full build up front, then (unless
    // running once) start the change coordinator.
    rt_tx.send(RuntimeEvent::CompileAllRequested).await?;
    if !args.once && config.config.auto_start {
        rt_tx.send(RuntimeEvent::StartRequested).await?;
    }
    drop(rt_tx);

    let runtime = Runtime::new(
        CoordinatorCore::new(),
        scanner,
        config.config.clone(),
        RuntimeOptions {
            exit_when_idle: args.once,
        },
        rt_rx,
        backend,
        watcher_spawner,
    );
    runtime.run().await
}

/// List the discovered template tree on stdout without compiling anything.
fn dry_run(scanner: &ProjectScanner) -> Result<()> {
    let files = scanner.enumerate()?;
    for file in &files {
        let name = relative_str(scanner.root(), file)
            .unwrap_or_else(|| file.display().to_string());
        let edges = scanner.scan_edges(file);
        println!("{name}");
        for edge in &edges {
            let edge_name = relative_str(scanner.root(), edge)
                .unwrap_or_else(|| edge.display().to_string());
            println!("  -> {edge_name}");
        }
    }
    debug!(count = files.len(), "dry run complete");
    Ok(())
}

/// The project root is the directory the config file lives in.
fn config_root_dir(config_path: &Path) -> Result<PathBuf> {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    dir.canonicalize()
        .with_context(|| format!("resolving project root from config path {:?}", config_path))
}
