//! Graceful shutdown.

use std::time::Duration;

use super::core::MarbleApp;

impl MarbleApp {
    /// Stop the frame loop, cancel background work, and release GPU
    /// resources, in that order.
    pub(super) fn shutdown(&mut self) {
        if let Some(ref mut scene) = self.scene {
            scene.close();
        }
        self.scene = None;

        self.assets_rx = None;
        self.config_rx = None;
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.gpu = None;
        tracing::info!("Shutdown complete");
    }
}
