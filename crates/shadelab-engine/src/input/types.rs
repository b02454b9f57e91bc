use std::fmt;

/// Keyboard key identifier, by meaning rather than physical position.
///
/// Printable keys arrive as lowercase `Char`s so bindings ignore Shift and
/// Caps Lock.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Char(char),

    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Anything not represented above.
    Other,
}

impl Key {
    /// Lowercased character key.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_lowercase().next().unwrap_or(c))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True for auto-repeat presses.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "'{c}'"),
            other => write!(f, "{other:?}"),
        }
    }
}
