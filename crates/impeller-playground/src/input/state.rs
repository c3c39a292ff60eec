use super::types::{InputEvent, Key, KeyState};

/// Close-request tracking for the open playground window.
///
/// Pointer motion is not stored here; the playground keeps the cursor.
#[derive(Debug, Default)]
pub struct InputState {
    close_requested: bool,
}

impl InputState {
    /// Applies one event.
    ///
    /// Releasing Escape or Q requests close; presses are ignored.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Key {
                key: Key::Escape | Key::Q,
                state: KeyState::Released,
            } => self.request_close(),

            InputEvent::Key { .. } | InputEvent::PointerMoved(_) => {}

            InputEvent::CloseRequested => self.request_close(),
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}
