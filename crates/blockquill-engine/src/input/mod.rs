//! Keyboard input, independent of any UI toolkit.
//!
//! The UI translates its native key events into a [`KeyPress`]; everything
//! downstream (gate, list nesting, hotkeys, default editing) only sees this.

use crate::editing::{Cmd, Direction, MarkKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A printable character, as typed (already shifted)
    Character(String),
    Enter,
    Tab,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// Anything else the editor does not act on
    Other(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    /// True when only Alt is held
    fn alt_only(&self) -> bool {
        *self == Self::alt()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::plain(Key::Character(c.to_string()))
    }

    /// Keys that remove content and therefore pass the block-limit gate
    pub fn is_deletion(&self) -> bool {
        matches!(self.key, Key::Backspace | Key::Delete)
    }
}

/// Mark toggled by an Alt hotkey: Alt+B, Alt+I, Alt+U, Alt+`
pub fn mark_hotkey(press: &KeyPress) -> Option<MarkKind> {
    if !press.modifiers.alt_only() {
        return None;
    }
    let Key::Character(c) = &press.key else {
        return None;
    };
    match c.to_lowercase().as_str() {
        "b" => Some(MarkKind::Bold),
        "i" => Some(MarkKind::Italic),
        "u" => Some(MarkKind::Underlined),
        "`" => Some(MarkKind::Code),
        _ => None,
    }
}

/// What the editor does with a key nobody else claimed
pub fn default_action(press: &KeyPress) -> Option<Cmd> {
    match &press.key {
        Key::Character(text) if !press.modifiers.ctrl && !press.modifiers.meta => {
            Some(Cmd::InsertText(text.clone()))
        }
        Key::Enter => Some(Cmd::SplitBlock),
        Key::Backspace => Some(Cmd::DeleteBackward),
        Key::Delete => Some(Cmd::DeleteForward),
        Key::ArrowLeft => Some(move_focus(Direction::Left, press)),
        Key::ArrowRight => Some(move_focus(Direction::Right, press)),
        Key::ArrowUp => Some(move_focus(Direction::Up, press)),
        Key::ArrowDown => Some(move_focus(Direction::Down, press)),
        _ => None,
    }
}

/// Shift extends the selection instead of moving the caret
fn move_focus(direction: Direction, press: &KeyPress) -> Cmd {
    Cmd::MoveFocus {
        direction,
        extend: press.modifiers.shift,
    }
}
