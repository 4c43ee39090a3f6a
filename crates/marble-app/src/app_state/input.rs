//! Pointer and touch input, routed to the orbit controller.

use winit::event::{Touch, TouchPhase};

use super::core::MarbleApp;

impl MarbleApp {
    fn viewport_height(&self) -> f32 {
        self.window
            .as_ref()
            .map(|w| w.inner_size().height as f32)
            .unwrap_or(0.0)
    }

    pub(super) fn handle_cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        if !self.mouse_down {
            return;
        }
        let height = self.viewport_height();
        if let Some(scene) = self.scene.as_mut() {
            scene.orbit_mut().pointer_move(x, y, height);
        }
    }

    pub(super) fn handle_left_button(&mut self, pressed: bool) {
        self.mouse_down = pressed;
        let (x, y) = self.cursor;
        if let Some(scene) = self.scene.as_mut() {
            let orbit = scene.orbit_mut();
            if pressed {
                orbit.pointer_down(x, y);
            } else {
                orbit.pointer_up();
            }
        }
    }

    /// Single-finger drag rotates; other fingers are ignored.
    pub(super) fn handle_touch(&mut self, touch: Touch) {
        let (x, y) = (touch.location.x as f32, touch.location.y as f32);
        let height = self.viewport_height();
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let orbit = scene.orbit_mut();

        match touch.phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(touch.id);
                orbit.pointer_down(x, y);
            }
            TouchPhase::Moved if self.active_touch == Some(touch.id) => {
                orbit.pointer_move(x, y, height);
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(touch.id) => {
                self.active_touch = None;
                orbit.pointer_up();
            }
            _ => {}
        }
    }
}
