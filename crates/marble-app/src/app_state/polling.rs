//! Polling of background results: loaded assets and reloaded config.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use marble_common::MarbleError;
use marble_renderer::MarbleScene;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::{MarbleApp, POLL_INTERVAL};

impl MarbleApp {
    /// Poll pending work and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_assets();
        self.poll_config();

        if self.assets_rx.is_some() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
        } else {
            // Frames are paced by the surface; config changes arrive rarely.
            event_loop.set_control_flow(ControlFlow::WaitUntil(
                Instant::now() + POLL_INTERVAL * 8,
            ));
        }
    }

    /// Build the scene once assets arrive.
    fn poll_assets(&mut self) {
        let Some(rx) = self.assets_rx.as_ref() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(MarbleError::Other(
                "asset loader stopped without a result".into(),
            )),
        };
        self.assets_rx = None;

        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        let built = result
            .and_then(|assets| pollster::block_on(MarbleScene::new(gpu, assets, &self.config)));
        match built {
            Ok(scene) => {
                self.scene = Some(scene);
                self.clock = marble_renderer::FrameClock::new();
                self.request_redraw();
            }
            Err(e) => self.fail(e),
        }
    }

    /// Re-apply `[render]` when the config file changes.
    fn poll_config(&mut self) {
        let Some(rx) = self.config_rx.as_mut() else {
            return;
        };
        if !rx.has_changed().unwrap_or(false) {
            return;
        }
        let config = rx.borrow_and_update().clone();
        if config.render == self.config.render {
            return;
        }

        if let (Some(gpu), Some(scene)) = (self.gpu.as_ref(), self.scene.as_mut()) {
            match pollster::block_on(scene.apply_params(gpu, &config.render)) {
                Ok(()) => tracing::info!("Render settings re-applied"),
                Err(e) => {
                    tracing::warn!("Ignoring render settings: {e}");
                    return;
                }
            }
        }
        self.config.render = config.render;
    }
}
