use std::collections::HashSet;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// One scroll "line" per this many pixels when the platform reports pixel
/// deltas instead of line deltas.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Adapter that bridges winit events to the Controller trait and the
/// camera's mouse protocol.
///
/// Cursor tracking keeps the last seen position; the very first sample
/// only seeds it and produces no delta, so the camera does not jump when
/// the cursor first enters the window.
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    cursor_position: Option<(f32, f32)>,
    cursor_delta: (f32, f32),
    scroll_delta: f32,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit WindowEvent and update internal state.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        match event.state {
                            ElementState::Pressed => {
                                let _ = self.pressed_keys.insert(button);
                            }
                            ElementState::Released => {
                                let _ = self.pressed_keys.remove(&button);
                            }
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.track_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.scroll_delta += y,
                MouseScrollDelta::PixelDelta(pos) => {
                    self.scroll_delta += pos.y as f32 / PIXELS_PER_SCROLL_LINE;
                }
            },
            _ => {}
        }
    }

    /// Accumulated cursor delta since the last reset. The y component is
    /// inverted: window coordinates grow downward, pitch grows upward.
    pub fn cursor_delta(&self) -> (f32, f32) {
        self.cursor_delta
    }

    /// Accumulated scroll-wheel delta (in lines) since the last reset.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame deltas. Call after the frame's input has been
    /// applied; held-key state and the last cursor position survive.
    pub fn reset_deltas(&mut self) {
        self.cursor_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    fn track_cursor(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.cursor_position {
            self.cursor_delta.0 += x - last_x;
            self.cursor_delta.1 += last_y - y;
        }
        self.cursor_position = Some((x, y));
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit event structs cannot be constructed outside the library, so
    // these tests drive the cursor-tracking logic directly.

    #[test]
    fn new_controller_has_no_state() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.cursor_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
    }

    #[test]
    fn first_cursor_sample_produces_no_delta() {
        let mut controller = WinitController::new();

        controller.track_cursor(640.0, 360.0);
        assert_eq!(controller.cursor_delta(), (0.0, 0.0));
    }

    #[test]
    fn second_cursor_sample_yields_inverted_y_delta() {
        let mut controller = WinitController::new();

        controller.track_cursor(100.0, 200.0);
        controller.track_cursor(110.0, 185.0);

        // Cursor moved 10 right and 15 up on screen.
        assert_eq!(controller.cursor_delta(), (10.0, 15.0));
    }

    #[test]
    fn cursor_deltas_accumulate_within_a_frame() {
        let mut controller = WinitController::new();

        controller.track_cursor(0.0, 0.0);
        controller.track_cursor(4.0, -2.0);
        controller.track_cursor(10.0, -5.0);

        assert_eq!(controller.cursor_delta(), (10.0, 5.0));
    }

    #[test]
    fn reset_clears_deltas_but_keeps_cursor_position() {
        let mut controller = WinitController::new();

        controller.track_cursor(50.0, 50.0);
        controller.track_cursor(60.0, 40.0);
        controller.scroll_delta = 3.0;

        controller.reset_deltas();
        assert_eq!(controller.cursor_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);

        // Next sample still measures against the remembered position, not
        // a fresh first-sample seed.
        controller.track_cursor(61.0, 40.0);
        assert_eq!(controller.cursor_delta(), (1.0, 0.0));
    }

    #[test]
    fn movement_keys_map_to_buttons() {
        assert_eq!(
            WinitController::keycode_to_button(KeyCode::KeyW),
            Some(Button::KeyW)
        );
        assert_eq!(
            WinitController::keycode_to_button(KeyCode::KeyA),
            Some(Button::KeyA)
        );
        assert_eq!(
            WinitController::keycode_to_button(KeyCode::KeyS),
            Some(Button::KeyS)
        );
        assert_eq!(
            WinitController::keycode_to_button(KeyCode::KeyD),
            Some(Button::KeyD)
        );
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyQ), None);
    }
}
