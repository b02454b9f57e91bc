use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events the input subsystem does not track.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(InputEvent::Key {
                key: map_logical_key(&event.logical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// Maps a winit logical key; multi-character input keeps its first char.
pub(crate) fn map_logical_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Character(text) => match text.chars().next() {
            Some(' ') => Key::Space,
            Some(c) => Key::char(c),
            None => Key::Other,
        },
        WinitKey::Named(named) => match named {
            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Space => Key::Space,
            NamedKey::Tab => Key::Tab,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            _ => Key::Other,
        },
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    fn character(s: &str) -> WinitKey {
        WinitKey::Character(SmolStr::new(s))
    }

    #[test]
    fn letters_are_lowercased() {
        assert_eq!(map_logical_key(&character("S")), Key::Char('s'));
        assert_eq!(map_logical_key(&character("g")), Key::Char('g'));
    }

    #[test]
    fn space_is_named_either_way() {
        assert_eq!(map_logical_key(&character(" ")), Key::Space);
        assert_eq!(map_logical_key(&WinitKey::Named(NamedKey::Space)), Key::Space);
    }

    #[test]
    fn named_keys() {
        assert_eq!(map_logical_key(&WinitKey::Named(NamedKey::Escape)), Key::Escape);
        assert_eq!(map_logical_key(&WinitKey::Named(NamedKey::F5)), Key::Other);
    }

    #[test]
    fn focus_events_translate() {
        assert_eq!(
            translate_window_event(&WindowEvent::Focused(true)),
            Some(InputEvent::Focused(true))
        );
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), None);
    }
}
