use blockquill_engine::input::{Key, KeyPress, Modifiers};
use dioxus::prelude::keyboard_types::{Key as DomKey, Modifiers as DomModifiers};
use dioxus::prelude::*;

/// Translate a DOM keyboard event into the editor's key model
pub fn key_press(event: &KeyboardEvent) -> KeyPress {
    to_key_press(event.key(), event.modifiers())
}

pub fn to_key_press(key: DomKey, modifiers: DomModifiers) -> KeyPress {
    let key = match key {
        DomKey::Character(text) => Key::Character(text),
        DomKey::Enter => Key::Enter,
        DomKey::Tab => Key::Tab,
        DomKey::Backspace => Key::Backspace,
        DomKey::Delete => Key::Delete,
        DomKey::ArrowLeft => Key::ArrowLeft,
        DomKey::ArrowRight => Key::ArrowRight,
        DomKey::ArrowUp => Key::ArrowUp,
        DomKey::ArrowDown => Key::ArrowDown,
        other => Key::Other(other.to_string()),
    };
    KeyPress::new(
        key,
        Modifiers {
            shift: modifiers.shift(),
            alt: modifiers.alt(),
            ctrl: modifiers.ctrl(),
            meta: modifiers.meta(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shift_tab_maps_to_tab_with_shift() {
        let press = to_key_press(DomKey::Tab, DomModifiers::SHIFT);
        assert_eq!(press, KeyPress::new(Key::Tab, Modifiers::shift()));
    }

    #[test]
    fn test_alt_character() {
        let press = to_key_press(DomKey::Character("b".into()), DomModifiers::ALT);
        assert_eq!(
            press,
            KeyPress::new(Key::Character("b".into()), Modifiers::alt())
        );
    }

    #[test]
    fn test_shift_arrow_keeps_shift() {
        let press = to_key_press(DomKey::ArrowLeft, DomModifiers::SHIFT);
        assert_eq!(press, KeyPress::new(Key::ArrowLeft, Modifiers::shift()));
    }

    #[test]
    fn test_unhandled_keys_are_other() {
        let press = to_key_press(DomKey::Escape, DomModifiers::empty());
        assert_eq!(press.key, Key::Other("Escape".into()));
    }
}
