//! Terminal key translation and the picker's key help.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dialcode_dom::Key;

/// Translate a terminal key press into the DOM key the picker understands.
///
/// Returns `None` for chords (Ctrl/Alt held), which the picker never
/// handles; the host application keeps those for itself.
pub fn dom_key(event: &KeyEvent) -> Option<Key> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let key = match event.code {
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Character(c),
        other => Key::Other(format!("{other:?}")),
    };
    Some(key)
}

/// A key shown in the picker's help line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub keys: &'static str,
    pub description: &'static str,
}

impl Binding {
    const fn new(keys: &'static str, description: &'static str) -> Self {
        Self { keys, description }
    }
}

const CLOSED: &[Binding] = &[Binding::new("↓/enter/space", "open")];

const OPEN: &[Binding] = &[
    Binding::new("↑/↓", "move"),
    Binding::new("a-z", "jump"),
    Binding::new("enter", "choose"),
    Binding::new("tab/esc", "close"),
];

/// Bindings that apply in the current list state.
pub fn bindings(open: bool) -> &'static [Binding] {
    if open {
        OPEN
    } else {
        CLOSED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(dom_key(&key(KeyCode::Down, KeyModifiers::NONE)), Some(Key::ArrowDown));
        assert_eq!(dom_key(&key(KeyCode::Up, KeyModifiers::NONE)), Some(Key::ArrowUp));
        assert_eq!(dom_key(&key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Key::Space));
        assert_eq!(dom_key(&key(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Escape));
    }

    #[test]
    fn shifted_letters_pass_through() {
        assert_eq!(
            dom_key(&key(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Some(Key::Character('D'))
        );
    }

    #[test]
    fn chords_are_left_to_the_host() {
        assert_eq!(dom_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), None);
        assert_eq!(dom_key(&key(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn other_keys_are_named() {
        assert_eq!(
            dom_key(&key(KeyCode::F(5), KeyModifiers::NONE)),
            Some(Key::Other("F(5)".to_string()))
        );
    }

    #[test]
    fn bindings_follow_list_state() {
        assert_eq!(bindings(false).len(), 1);
        assert!(bindings(true).iter().any(|b| b.description == "choose"));
    }
}
