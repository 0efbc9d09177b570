// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::fs::relative_str;
use crate::graph::normalize;
use crate::watch::patterns::TemplatePatterns;

/// Anything that keeps a watch subscription alive.
///
/// The runtime holds the guard while in the `Running` state and drops it on
/// stop, which releases the underlying subscription. Tests substitute a
/// no-op guard.
pub trait WatchGuard: Send {}

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl WatchGuard for WatcherHandle {}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes the given `root` directory
/// recursively and forwards template-file mutations into the runtime as
/// `FileChanged` / `FileAdded` / `FileRemoved` events.
///
/// - `root` is the project root against which the files glob is evaluated.
/// - `patterns` is the compiled template glob.
/// - `runtime_tx` is the channel into the main runtime.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    patterns: TemplatePatterns,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone()); // best-effort

    let patterns = Arc::new(patterns);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        {
            let event_tx = event_tx.clone();
            move |res: notify::Result<Event>| {
                match res {
                    Ok(event) => {
                        if let Err(err) = event_tx.send(event) {
                            // We can't log via tracing here easily, so fallback to stderr.
                            eprintln!("livetpl: failed to forward notify event: {err}");
                        }
                    }
                    Err(err) => {
                        eprintln!("livetpl: file watch error: {err}");
                    }
                }
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    // Async task that consumes notify events and forwards template mutations
    // to the runtime.
    let async_root = root.clone();
    let async_patterns = Arc::clone(&patterns);
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            for path in &event.paths {
                let Some(runtime_event) =
                    map_event(&event.kind, &async_root, path, &async_patterns)
                else {
                    continue;
                };

                if let Err(err) = runtime_tx.send(runtime_event).await {
                    warn!("failed to send watch event to runtime: {err}");
                    // If the runtime channel is closed, there's no point
                    // keeping the watcher loop alive.
                    return;
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Map a notify event on a single path to a runtime event, filtering out
/// paths the template glob doesn't cover.
fn map_event(
    kind: &EventKind,
    root: &Path,
    path: &Path,
    patterns: &TemplatePatterns,
) -> Option<RuntimeEvent> {
    let path = normalize(path);

    let Some(rel) = relative_str(root, &path) else {
        warn!("could not relativize path {:?} against root {:?}", path, root);
        return None;
    };
    if !patterns.matches(&rel) {
        return None;
    }

    match kind {
        EventKind::Create(_) => Some(RuntimeEvent::FileAdded(path)),
        EventKind::Modify(_) => Some(RuntimeEvent::FileChanged(path)),
        EventKind::Remove(_) => Some(RuntimeEvent::FileRemoved(path)),
        _ => None,
    }
}
