//! Mouse event handling.

/// Mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// No button (wheel and plain motion reports).
    None,
}

/// Kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    /// Motion while a button is held.
    Drag,
    ScrollUp,
    ScrollDown,
}

/// A mouse event in 0-indexed cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u32,
    pub y: u32,
    pub button: MouseButton,
    pub kind: MouseEventKind,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl MouseEvent {
    #[must_use]
    pub fn new(x: u32, y: u32, button: MouseButton, kind: MouseEventKind) -> Self {
        Self {
            x,
            y,
            button,
            kind,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    #[must_use]
    pub fn press(x: u32, y: u32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Press)
    }

    #[must_use]
    pub fn release(x: u32, y: u32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Release)
    }

    /// Decode an xterm button code.
    ///
    /// Bits 0-1 select the button, 4/8/16 are shift/alt/ctrl, 32 marks motion
    /// and 64 marks the wheel (64 up, 65 down). `pressed` is false for SGR
    /// `m` reports; in X10 encoding a release is button 3.
    #[must_use]
    pub fn from_button_code(code: u32, x: u32, y: u32, pressed: bool) -> Option<Self> {
        let base = code & 0b11;
        let kind = if code & 64 != 0 {
            match base {
                0 => MouseEventKind::ScrollUp,
                1 => MouseEventKind::ScrollDown,
                // horizontal wheel
                _ => return None,
            }
        } else if code & 32 != 0 {
            MouseEventKind::Drag
        } else if pressed && base != 3 {
            MouseEventKind::Press
        } else {
            MouseEventKind::Release
        };

        let button = if code & 64 != 0 {
            MouseButton::None
        } else {
            match base {
                0 => MouseButton::Left,
                1 => MouseButton::Middle,
                2 => MouseButton::Right,
                _ => MouseButton::None,
            }
        };

        Some(Self {
            x,
            y,
            button,
            kind,
            shift: code & 4 != 0,
            alt: code & 8 != 0,
            ctrl: code & 16 != 0,
        })
    }

    /// A left-button press, the only event that activates controls.
    #[must_use]
    pub fn is_left_click(&self) -> bool {
        self.kind == MouseEventKind::Press && self.button == MouseButton::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_press_and_release() {
        let press = MouseEvent::from_button_code(0, 4, 2, true).unwrap();
        assert!(press.is_left_click());
        assert_eq!((press.x, press.y), (4, 2));

        let release = MouseEvent::from_button_code(0, 4, 2, false).unwrap();
        assert_eq!(release.kind, MouseEventKind::Release);
        assert!(!release.is_left_click());
    }

    #[test]
    fn test_x10_release_is_button_three() {
        let event = MouseEvent::from_button_code(3, 0, 0, true).unwrap();
        assert_eq!(event.kind, MouseEventKind::Release);
        assert_eq!(event.button, MouseButton::None);
    }

    #[test]
    fn test_wheel_codes() {
        let up = MouseEvent::from_button_code(64, 1, 1, true).unwrap();
        let down = MouseEvent::from_button_code(65, 1, 1, true).unwrap();
        assert_eq!(up.kind, MouseEventKind::ScrollUp);
        assert_eq!(down.kind, MouseEventKind::ScrollDown);
        assert_eq!(up.button, MouseButton::None);
        assert!(MouseEvent::from_button_code(66, 1, 1, true).is_none());
    }

    #[test]
    fn test_modifiers_and_drag() {
        let event = MouseEvent::from_button_code(32 | 16 | 4 | 2, 0, 0, true).unwrap();
        assert_eq!(event.kind, MouseEventKind::Drag);
        assert_eq!(event.button, MouseButton::Right);
        assert!(event.shift && event.ctrl && !event.alt);
    }

    #[test]
    fn test_constructors() {
        assert!(MouseEvent::press(0, 0, MouseButton::Left).is_left_click());
        assert!(!MouseEvent::press(0, 0, MouseButton::Right).is_left_click());
        assert!(!MouseEvent::release(0, 0, MouseButton::Left).is_left_click());
    }
}
