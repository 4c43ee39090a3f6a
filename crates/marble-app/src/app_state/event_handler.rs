//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::MarbleApp;

/// Frames between frame-rate log lines.
const PERF_REPORT_INTERVAL: u64 = 600;

fn perf_report_due(frames: u64) -> bool {
    frames > 0 && frames % PERF_REPORT_INTERVAL == 0
}

impl ApplicationHandler for MarbleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_left_button(state == ElementState::Pressed);
            }

            WindowEvent::Touch(touch) => {
                self.handle_touch(touch);
            }

            // Zoom is disabled.
            WindowEvent::MouseWheel { .. } | WindowEvent::PinchGesture { .. } => {}

            WindowEvent::RedrawRequested => {
                self.render_frame();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.failure.is_some() {
            self.shutdown();
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl MarbleApp {
    /// Draw one frame and schedule the next while the frame loop runs.
    fn render_frame(&mut self) {
        let (Some(gpu), Some(scene)) = (self.gpu.as_ref(), self.scene.as_mut()) else {
            return;
        };
        let delta = self.clock.tick();
        if let Err(e) = scene.frame(gpu, delta) {
            tracing::error!("Frame failed: {e}");
        }
        if perf_report_due(scene.frames()) {
            tracing::debug!(
                fps = format!("{:.1}", self.clock.fps()),
                frame_ms = format!("{:.2}", self.clock.frame_time_ms()),
                "frame rate"
            );
        }
        if scene.is_running() {
            self.request_redraw();
        }
    }
}
