//! Core reload manager implementation.

use crate::schema::MarbleConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;
use marble_common::ConfigError;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Publishes validated configs whenever the config file changes.
///
/// Invalid edits are logged and skipped; receivers keep the last good
/// config.
pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Spawn the watch loop on the current tokio runtime.
    ///
    /// `initial` is the config already in use; the receiver starts with
    /// it marked as seen.
    pub fn spawn(self, initial: MarbleConfig) -> watch::Receiver<MarbleConfig> {
        let (config_tx, config_rx) = watch::channel(initial);
        tokio::spawn(async move {
            self.run_watch_loop(config_tx).await;
        });
        config_rx
    }

    async fn run_watch_loop(&self, config_tx: watch::Sender<MarbleConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = mpsc::channel::<()>(4);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("config watcher error: {e}");
            }
        });

        while change_rx.recv().await.is_some() {
            info!("reloading config from {}", self.config_path.display());
            match reload_config(&self.config_path) {
                Ok(config) => {
                    if config_tx.send(config).is_err() {
                        info!("all config receivers dropped, stopping reload manager");
                        break;
                    }
                }
                Err(e) => warn!("config reload failed, keeping previous config: {e}"),
            }
        }
    }
}

/// Read and validate the config at `path`.
pub(crate) fn reload_config(path: &Path) -> Result<MarbleConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
