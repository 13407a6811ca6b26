//! Debounced change notification for followed files.
//!
//! One `notify` watcher runs per directory, however many files in it are
//! followed. Subscriptions are reference counted: the watcher for a directory
//! is dropped with its last subscription.

use crate::error::{Result, TaildiffError};
use log::{debug, info, warn};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, RecommendedCache};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Default quiescence window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Per-file change counters of one directory, shared with the watcher callback.
type FileSignals = Arc<Mutex<HashMap<OsString, FileSignal>>>;

struct FileSignal {
    tx: watch::Sender<u64>,
    subscribers: usize,
}

struct DirectoryWatch {
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    files: FileSignals,
}

type Registry = Arc<Mutex<HashMap<PathBuf, DirectoryWatch>>>;

/// Hands out [`Subscription`]s, sharing one watcher per directory.
#[derive(Clone)]
pub struct ChangeNotifier {
    registry: Registry,
    debounce: Duration,
}

impl ChangeNotifier {
    pub fn new(debounce: Duration) -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
            debounce,
        }
    }

    /// Start listening for changes to `path`.
    pub fn subscribe(&self, path: impl AsRef<Path>) -> Result<Subscription> {
        let path = std::fs::canonicalize(path.as_ref())
            .map_err(|e| TaildiffError::file_error("Cannot resolve watched path", e))?;
        let (directory, file_name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
            _ => {
                return Err(TaildiffError::watch(format!(
                    "{} has no parent directory",
                    path.display()
                )))
            }
        };

        let mut registry = self.registry.lock();
        if !registry.contains_key(&directory) {
            let watch = self.watch_directory(&directory)?;
            registry.insert(directory.clone(), watch);
        }

        let files = match registry.get(&directory) {
            Some(watch) => Arc::clone(&watch.files),
            None => return Err(TaildiffError::watch("directory watch vanished")),
        };
        drop(registry);

        let rx = {
            let mut files = files.lock();
            let signal = files.entry(file_name.clone()).or_insert_with(|| FileSignal {
                tx: watch::channel(0).0,
                subscribers: 0,
            });
            signal.subscribers += 1;
            signal.tx.subscribe()
        };

        debug!("Subscribed to changes of {}", path.display());
        Ok(Subscription {
            rx,
            registry: Arc::clone(&self.registry),
            directory,
            file_name,
        })
    }

    /// Number of directories currently watched.
    pub fn watched_directories(&self) -> usize {
        self.registry.lock().len()
    }

    fn watch_directory(&self, directory: &Path) -> Result<DirectoryWatch> {
        let files: FileSignals = Arc::new(Mutex::new(HashMap::new()));
        let signals = Arc::clone(&files);

        let mut debouncer = new_debouncer(
            self.debounce,
            None, // No tick rate override
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    let files = signals.lock();
                    for event in &events {
                        for name in event.paths.iter().filter_map(|path| path.file_name()) {
                            if let Some(signal) = files.get(name) {
                                signal.tx.send_modify(|count| *count += 1);
                            }
                        }
                    }
                }
                Err(errors) => {
                    for error in errors {
                        warn!("File watcher error: {:?}", error);
                    }
                }
            },
        )?;

        debouncer.watch(directory, RecursiveMode::NonRecursive)?;
        info!("Watching: {}", directory.display());

        Ok(DirectoryWatch {
            _debouncer: debouncer,
            files,
        })
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

/// Interest in one file. Dropping it detaches from the shared watcher.
pub struct Subscription {
    rx: watch::Receiver<u64>,
    registry: Registry,
    directory: PathBuf,
    file_name: OsString,
}

impl Subscription {
    /// Wait until the file changes after the last call.
    pub async fn changed(&mut self) -> Result<()> {
        self.rx
            .changed()
            .await
            .map_err(|_| TaildiffError::watch("change notifier closed"))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self.registry.lock();
        let directory_idle = match registry.get(&self.directory) {
            Some(watch) => {
                let mut files = watch.files.lock();
                if let Some(signal) = files.get_mut(&self.file_name) {
                    signal.subscribers -= 1;
                    if signal.subscribers == 0 {
                        files.remove(&self.file_name);
                    }
                }
                files.is_empty()
            }
            None => false,
        };

        let removed = if directory_idle {
            registry.remove(&self.directory)
        } else {
            None
        };
        drop(registry);

        if removed.is_some() {
            debug!("Stopped watching {}", self.directory.display());
        }
    }
}
