//! Keyboard event types.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
    }
}

impl KeyModifiers {
    /// Decode the xterm modifier parameter (`1 + shift + 2*alt + 4*ctrl`).
    #[must_use]
    pub fn from_xterm_param(param: u8) -> Self {
        Self::from_bits_truncate(param.saturating_sub(1) & 0b111)
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab,
    Delete,
    Insert,
    /// Function key (F1-F12).
    F(u8),
    /// A character key (includes space).
    Char(char),
    Esc,
    /// Ctrl+Space or Ctrl+@.
    Null,
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    #[must_use]
    pub fn is_ctrl_c(&self) -> bool {
        self.code == KeyCode::Char('c') && self.modifiers == KeyModifiers::CTRL
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xterm_modifier_param() {
        assert_eq!(KeyModifiers::from_xterm_param(1), KeyModifiers::empty());
        assert_eq!(KeyModifiers::from_xterm_param(2), KeyModifiers::SHIFT);
        assert_eq!(KeyModifiers::from_xterm_param(3), KeyModifiers::ALT);
        assert_eq!(
            KeyModifiers::from_xterm_param(6),
            KeyModifiers::SHIFT | KeyModifiers::CTRL
        );
        assert_eq!(KeyModifiers::from_xterm_param(0), KeyModifiers::empty());
    }

    #[test]
    fn test_ctrl_c() {
        assert!(KeyEvent::with_ctrl(KeyCode::Char('c')).is_ctrl_c());
        assert!(!KeyEvent::char('c').is_ctrl_c());
        assert!(!KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CTRL | KeyModifiers::ALT).is_ctrl_c());
    }

    #[test]
    fn test_from_char() {
        let event: KeyEvent = 'j'.into();
        assert_eq!(event.code, KeyCode::Char('j'));
    }
}
