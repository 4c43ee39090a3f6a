//! Window creation, renderer initialization, and background tasks.

use std::sync::mpsc;
use std::sync::Arc;

use marble_common::MarbleError;
use marble_config::ReloadManager;
use marble_renderer::{load_assets, GpuContext, PrefilterSettings};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::core::MarbleApp;

impl MarbleApp {
    /// Create the window and GPU context and start loading assets.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_transparent(window_config.transparent)
            .with_resizable(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width as f64,
                window_config.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(MarbleError::Other(format!("failed to create window: {e}")));
                return false;
            }
        };

        let transparent = self.config.window.transparent;
        match pollster::block_on(GpuContext::new(window.clone(), transparent)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.fail(e.into());
                return false;
            }
        }

        if let Err(e) = self.start_background_tasks() {
            self.fail(e);
            return false;
        }

        self.window = Some(window);
        tracing::info!("Window created, loading assets");
        true
    }

    /// Spawn the asset load and the config reload manager on a runtime
    /// owned by the app.
    fn start_background_tasks(&mut self) -> Result<(), MarbleError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let (tx, rx) = mpsc::channel();
        let assets = self.config.assets.clone();
        runtime.spawn(async move {
            let result = load_assets(&assets, PrefilterSettings::default()).await;
            // The receiver is gone only if the app already shut down.
            let _ = tx.send(result);
        });

        {
            let _guard = runtime.enter();
            let reload = ReloadManager::new(self.config_path.clone());
            self.config_rx = Some(reload.spawn(self.config.clone()));
        }

        self.assets_rx = Some(rx);
        self.tokio_runtime = Some(runtime);
        Ok(())
    }
}
