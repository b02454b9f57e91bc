use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current keyboard and focus state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Keys currently held.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies `ev` to the held-key set and records the transition in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !*focused {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state: KeyState::Pressed, repeat } => {
                self.keys_down.insert(*key);
                if !*repeat {
                    frame.keys_pressed.insert(*key);
                }
            }

            InputEvent::Key { key, state: KeyState::Released, .. } => {
                if self.keys_down.remove(key) {
                    frame.keys_released.insert(*key);
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Released, repeat: false }
    }

    #[test]
    fn press_then_release_records_both_transitions() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Char('s'), false));
        assert!(state.key_down(Key::Char('s')));
        assert!(frame.pressed(Key::Char('s')));

        state.apply_event(&mut frame, release(Key::Char('s')));
        assert!(!state.key_down(Key::Char('s')));
        assert!(frame.keys_released.contains(&Key::Char('s')));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn repeat_does_not_count_as_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Space, false));
        frame.clear();
        state.apply_event(&mut frame, press(Key::Space, true));

        assert!(state.key_down(Key::Space));
        assert!(!frame.pressed(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Char('f'), false));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(state.keys_down.is_empty());
        assert!(!state.focused);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, release(Key::Escape));
        assert!(frame.keys_released.is_empty());
    }
}
