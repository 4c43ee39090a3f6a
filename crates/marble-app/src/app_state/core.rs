//! MarbleApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use marble_common::MarbleError;
use marble_config::MarbleConfig;
use marble_renderer::{FrameClock, GpuContext, LoadedAssets, MarbleScene};
use tokio::sync::watch;
use winit::window::Window;

/// How often pending work is polled before the scene exists.
pub(super) const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(16);

pub struct MarbleApp {
    pub(super) config: MarbleConfig,
    pub(super) config_path: PathBuf,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) gpu: Option<GpuContext>,
    pub(super) scene: Option<MarbleScene>,
    pub(super) clock: FrameClock,

    // Background work
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) assets_rx: Option<mpsc::Receiver<Result<LoadedAssets, MarbleError>>>,
    pub(super) config_rx: Option<watch::Receiver<MarbleConfig>>,

    // Pointer tracking
    pub(super) cursor: (f32, f32),
    pub(super) mouse_down: bool,
    pub(super) active_touch: Option<u64>,

    /// First fatal error; decides the exit status.
    pub(super) failure: Option<MarbleError>,
}

impl MarbleApp {
    pub fn new(config: MarbleConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            window: None,
            gpu: None,
            scene: None,
            clock: FrameClock::new(),
            tokio_runtime: None,
            assets_rx: None,
            config_rx: None,
            cursor: (0.0, 0.0),
            mouse_down: false,
            active_touch: None,
            failure: None,
        }
    }

    pub fn into_failure(self) -> Option<MarbleError> {
        self.failure
    }

    /// Record a fatal error. Only the first one is kept.
    pub(super) fn fail(&mut self, error: MarbleError) {
        tracing::error!("{error}");
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }

    pub(super) fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
