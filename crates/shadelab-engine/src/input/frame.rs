use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Input deltas collected since the previous frame.
///
/// `InputState` holds what is currently down; this holds what changed.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame (auto-repeat excluded).
    pub keys_pressed: HashSet<Key>,

    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
