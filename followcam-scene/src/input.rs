/// Keyboard and mouse state for one frame.
///
/// Key codes are ASCII for letters (`b'W'`), matching what the window layer
/// forwards. Mouse deltas accumulate until [`InputState::end_frame`].
#[derive(Debug, Clone)]
pub struct InputState {
    keys_down: [bool; 256],
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub mouse_dx: f32,
    pub mouse_dy: f32,
    /// False until the first cursor report arrives.
    has_cursor: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: [false; 256],
            mouse_x: 0.0,
            mouse_y: 0.0,
            mouse_dx: 0.0,
            mouse_dy: 0.0,
            has_cursor: false,
        }
    }

    pub fn press(&mut self, key_code: u8) {
        self.keys_down[key_code as usize] = true;
    }

    pub fn release(&mut self, key_code: u8) {
        self.keys_down[key_code as usize] = false;
    }

    pub fn is_key_down(&self, key_code: u8) -> bool {
        self.keys_down[key_code as usize]
    }

    /// Record a cursor move to an absolute position.
    ///
    /// The first report only establishes the position and adds no delta.
    pub fn move_mouse(&mut self, x: f32, y: f32) {
        if self.has_cursor {
            self.mouse_dx += x - self.mouse_x;
            self.mouse_dy += y - self.mouse_y;
        }
        self.has_cursor = true;
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Reset per-frame deltas.
    pub fn end_frame(&mut self) {
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
