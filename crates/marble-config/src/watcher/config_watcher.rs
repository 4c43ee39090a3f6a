//! Core config file watcher implementation.

use marble_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Quiet period that must pass before a change is reported.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a config file and reports debounced changes.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Create a new watcher for the given config file path.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Watch until `changed` is closed, sending `()` once per burst of edits.
    ///
    /// The parent directory is watched rather than the file itself, so
    /// atomic saves (write to temp + rename) are still seen.
    pub async fn watch(&self, changed: mpsc::Sender<()>) -> Result<(), ConfigError> {
        let watch_path = self
            .path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.path.clone());
        let file_name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        info!("starting config file watcher for {}", self.path.display());

        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().is_some_and(|n| n == file_name));
                    if ours {
                        debug!("config file change detected");
                        let _ = raw_tx.try_send(());
                    }
                }
                Err(e) => error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::WatchError(format!("failed to watch {}: {e}", watch_path.display()))
            })?;

        while coalesce(&mut raw_rx, DEBOUNCE).await {
            info!("config file changed, sending reload signal");
            if changed.send(()).await.is_err() {
                debug!("reload signal receiver dropped, stopping watcher");
                break;
            }
        }

        drop(watcher);
        Ok(())
    }
}

/// Wait for one signal, then swallow further signals until `window`
/// passes without any. Returns `false` once the channel is closed.
pub async fn coalesce(rx: &mut mpsc::Receiver<()>, window: Duration) -> bool {
    if rx.recv().await.is_none() {
        return false;
    }

    loop {
        tokio::select! {
            _ = tokio::time::sleep(window) => return true,
            msg = rx.recv() => {
                if msg.is_none() {
                    return true;
                }
            }
        }
    }
}
