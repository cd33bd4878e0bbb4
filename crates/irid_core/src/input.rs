use std::collections::HashSet;

/// Re-exported key code from `winit` so callers don't need a direct winit
/// dependency just to name keys.
pub use winit::keyboard::KeyCode;

/// State of the keyboard and mouse at a given moment.
///
/// The application runner drives this structure by feeding it the events
/// coming from `winit`; everything downstream (the scene's input handling)
/// only queries it through the helpers below.
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    /// accumulated raw movement since the last `consume_mouse_delta` call
    mouse_delta: (f32, f32),
}

impl InputState {
    /// Creates a fresh, empty input state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Called by the event loop when a key-down/key-up event arrives.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Returns true if the given key is currently pressed down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Accumulates a raw mouse motion delta (from `DeviceEvent::MouseMotion`).
    ///
    /// Deltas sum until consumed so multiple motion events within one frame
    /// are not lost.
    pub fn push_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Retrieve and reset the mouse movement delta since the last call.
    pub fn consume_mouse_delta(&mut self) -> (f32, f32) {
        let d = self.mouse_delta;
        self.mouse_delta = (0.0, 0.0);
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_pressed(KeyCode::KeyW));
        state.update_key(KeyCode::KeyW, true);
        assert!(state.is_key_pressed(KeyCode::KeyW));
        state.update_key(KeyCode::KeyW, false);
        assert!(!state.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut state = InputState::new();
        state.push_mouse_delta(3.0, -1.0);
        state.push_mouse_delta(2.0, 2.0);
        assert_eq!(state.consume_mouse_delta(), (5.0, 1.0));
        // consumption resets
        assert_eq!(state.consume_mouse_delta(), (0.0, 0.0));
    }
}
