/// Logical key carried by a [`KeyboardEvent`].
///
/// Mirrors the DOM `KeyboardEvent.key` values the picker cares about; every
/// other key is kept verbatim in [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Space,
    Tab,
    Escape,
    /// A single printable character.
    Character(char),
    Other(String),
}

impl Key {
    /// Parse a DOM `key` string.
    ///
    /// Browsers report the space bar as `" "`; `"Space"` and `"Spacebar"` are
    /// accepted as well.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }

    /// The character for a single ASCII letter key, if this is one.
    pub fn letter(&self) -> Option<char> {
        match self {
            Key::Character(c) if c.is_ascii_alphabetic() => Some(*c),
            _ => None,
        }
    }
}

/// A `keydown` event delivered to a focused element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    key: Key,
    default_prevented: bool,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            default_prevented: false,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Suppress the host's default handling of this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<Key> for KeyboardEvent {
    fn from(key: Key) -> Self {
        KeyboardEvent::new(key)
    }
}

/// How [`Document::scroll_into_view`](crate::Document::scroll_into_view) animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Vertical alignment of the scrolled-to element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}
