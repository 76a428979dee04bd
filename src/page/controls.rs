//! Clickable controls, the actions they trigger, and input bindings.
//!
//! The view only hands out [`Control`] values (encoded as hit ids in the
//! renderer's hit grid); the page is the one place actions are applied.

use crate::input::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use crate::page::scroll::ScrollConfig;
use crate::page::section::SectionId;

/// Something on screen that reacts to a left click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Brand,
    Nav(SectionId),
    GetStarted,
    MenuToggle,
    /// "How It Works"
    HeroPrimary,
    /// "White Papers"
    HeroSecondary,
    CarouselPrev,
    CarouselNext,
    CarouselDot(usize),
    ScrollTop,
    FooterLink(SectionId),
}

impl Control {
    /// Hit grid id: control kind in the high bits, argument in the low byte.
    /// Zero is never produced.
    #[must_use]
    pub fn hit_id(self) -> u32 {
        let (kind, arg) = match self {
            Self::Brand => (1, 0),
            Self::Nav(id) => (2, id.index()),
            Self::GetStarted => (3, 0),
            Self::MenuToggle => (4, 0),
            Self::HeroPrimary => (5, 0),
            Self::HeroSecondary => (6, 0),
            Self::CarouselPrev => (7, 0),
            Self::CarouselNext => (8, 0),
            Self::CarouselDot(k) => (9, k.min(0xFF)),
            Self::ScrollTop => (10, 0),
            Self::FooterLink(id) => (11, id.index()),
        };
        (kind << 8) | arg as u32
    }

    #[must_use]
    pub fn from_hit_id(id: u32) -> Option<Self> {
        let arg = (id & 0xFF) as usize;
        let section = || SectionId::ALL.get(arg).copied();
        match id >> 8 {
            1 => Some(Self::Brand),
            2 => section().map(Self::Nav),
            3 => Some(Self::GetStarted),
            4 => Some(Self::MenuToggle),
            5 => Some(Self::HeroPrimary),
            6 => Some(Self::HeroSecondary),
            7 => Some(Self::CarouselPrev),
            8 => Some(Self::CarouselNext),
            9 => Some(Self::CarouselDot(arg)),
            10 => Some(Self::ScrollTop),
            11 => section().map(Self::FooterLink),
            _ => None,
        }
    }

    #[must_use]
    pub fn action(self) -> Action {
        match self {
            Self::Brand => Action::JumpTo(SectionId::Home),
            Self::Nav(id) | Self::FooterLink(id) => Action::JumpTo(id),
            Self::GetStarted | Self::HeroPrimary => Action::JumpTo(SectionId::Download),
            Self::HeroSecondary => Action::JumpTo(SectionId::Demo),
            Self::MenuToggle => Action::ToggleMenu,
            Self::CarouselPrev => Action::PrevTestimonial,
            Self::CarouselNext => Action::NextTestimonial,
            Self::CarouselDot(k) => Action::ShowTestimonial(k),
            Self::ScrollTop => Action::ScrollToTop,
        }
    }
}

/// A state change the page knows how to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    JumpTo(SectionId),
    ScrollToTop,
    ToggleMenu,
    PrevTestimonial,
    NextTestimonial,
    ShowTestimonial(usize),
    /// Instant scroll by rows; negative is up.
    ScrollLines(i32),
    ScrollPages(i32),
    ScrollToEnd,
    Quit,
}

/// Keyboard binding.
#[must_use]
pub fn key_action(key: &KeyEvent, scroll: &ScrollConfig) -> Option<Action> {
    if key.is_ctrl_c() {
        return Some(Action::Quit);
    }
    if key.ctrl() || key.alt() {
        return None;
    }
    let line = scroll.line_step as i32;

    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollLines(-line),
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollLines(line),
        KeyCode::PageUp => Action::ScrollPages(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => Action::ScrollPages(1),
        KeyCode::Home | KeyCode::Char('g') => Action::ScrollToTop,
        KeyCode::End | KeyCode::Char('G') => Action::ScrollToEnd,
        KeyCode::Left | KeyCode::Char('h') => Action::PrevTestimonial,
        KeyCode::Right | KeyCode::Char('l') => Action::NextTestimonial,
        KeyCode::Char('m') => Action::ToggleMenu,
        KeyCode::Char('t') => Action::ScrollToTop,
        KeyCode::Char(c @ '1'..='9') => {
            let ordinal = c.to_digit(10)? as usize;
            Action::JumpTo(SectionId::from_ordinal(ordinal)?)
        }
        _ => return None,
    };
    Some(action)
}

/// Mouse binding; `hit` is the hit id under the pointer, if any.
#[must_use]
pub fn mouse_action(mouse: &MouseEvent, hit: Option<u32>, scroll: &ScrollConfig) -> Option<Action> {
    let wheel = scroll.wheel_step as i32;
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::ScrollLines(-wheel)),
        MouseEventKind::ScrollDown => Some(Action::ScrollLines(wheel)),
        _ if mouse.is_left_click() => hit.and_then(Control::from_hit_id).map(Control::action),
        _ => None,
    }
}

/// Binding for any input event. Resize and focus events carry no action.
pub fn event_action(
    event: &Event,
    hit_test: impl FnOnce(u32, u32) -> Option<u32>,
    scroll: &ScrollConfig,
) -> Option<Action> {
    match event {
        Event::Key(key) => key_action(key, scroll),
        Event::Mouse(mouse) => {
            let hit = mouse.is_left_click().then(|| hit_test(mouse.x, mouse.y)).flatten();
            mouse_action(mouse, hit, scroll)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyModifiers, MouseButton};

    fn all_controls() -> Vec<Control> {
        let mut controls = vec![
            Control::Brand,
            Control::GetStarted,
            Control::MenuToggle,
            Control::HeroPrimary,
            Control::HeroSecondary,
            Control::CarouselPrev,
            Control::CarouselNext,
            Control::ScrollTop,
        ];
        for id in SectionId::ALL {
            controls.push(Control::Nav(id));
            controls.push(Control::FooterLink(id));
        }
        controls.extend((0..3).map(Control::CarouselDot));
        controls
    }

    #[test]
    fn test_hit_ids_are_distinct_and_decode() {
        let controls = all_controls();
        let mut ids: Vec<_> = controls.iter().map(|c| c.hit_id()).collect();
        for (control, id) in controls.iter().zip(&ids) {
            assert_ne!(*id, 0);
            assert_eq!(Control::from_hit_id(*id), Some(*control));
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), controls.len());
    }

    #[test]
    fn test_unknown_hit_ids() {
        assert_eq!(Control::from_hit_id(0), None);
        assert_eq!(Control::from_hit_id(12 << 8), None);
        assert_eq!(Control::from_hit_id((2 << 8) | 7), None);
    }

    #[test]
    fn test_control_actions() {
        assert_eq!(Control::Brand.action(), Action::JumpTo(SectionId::Home));
        assert_eq!(Control::HeroPrimary.action(), Action::JumpTo(SectionId::Download));
        assert_eq!(Control::HeroSecondary.action(), Action::JumpTo(SectionId::Demo));
        assert_eq!(Control::GetStarted.action(), Action::JumpTo(SectionId::Download));
        assert_eq!(
            Control::FooterLink(SectionId::Security).action(),
            Action::JumpTo(SectionId::Security)
        );
        assert_eq!(Control::CarouselDot(2).action(), Action::ShowTestimonial(2));
    }

    #[test]
    fn test_key_bindings() {
        let cfg = ScrollConfig::default();
        let key = |code| key_action(&KeyEvent::key(code), &cfg);
        assert_eq!(key(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(
            key_action(&KeyEvent::with_ctrl(KeyCode::Char('c')), &cfg),
            Some(Action::Quit)
        );
        assert_eq!(key(KeyCode::Char('j')), Some(Action::ScrollLines(1)));
        assert_eq!(key(KeyCode::Up), Some(Action::ScrollLines(-1)));
        assert_eq!(key(KeyCode::Char(' ')), Some(Action::ScrollPages(1)));
        assert_eq!(key(KeyCode::PageUp), Some(Action::ScrollPages(-1)));
        assert_eq!(key(KeyCode::Char('G')), Some(Action::ScrollToEnd));
        assert_eq!(key(KeyCode::Home), Some(Action::ScrollToTop));
        assert_eq!(key(KeyCode::Char('3')), Some(Action::JumpTo(SectionId::Demo)));
        assert_eq!(key(KeyCode::Char('7')), Some(Action::JumpTo(SectionId::Download)));
        assert_eq!(key(KeyCode::Char('8')), None);
        assert_eq!(key(KeyCode::Char('0')), None);
        assert_eq!(key(KeyCode::Right), Some(Action::NextTestimonial));
        assert_eq!(key(KeyCode::Char('m')), Some(Action::ToggleMenu));
        assert_eq!(key(KeyCode::Tab), None);
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let cfg = ScrollConfig::default();
        let alt_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);
        assert_eq!(key_action(&alt_q, &cfg), None);
    }

    #[test]
    fn test_mouse_bindings() {
        let cfg = ScrollConfig::default();
        let wheel = |code| MouseEvent::from_button_code(code, 0, 0, true).unwrap();
        assert_eq!(
            mouse_action(&wheel(65), None, &cfg),
            Some(Action::ScrollLines(3))
        );
        assert_eq!(
            mouse_action(&wheel(64), None, &cfg),
            Some(Action::ScrollLines(-3))
        );
        let click = MouseEvent::press(4, 1, MouseButton::Left);
        assert_eq!(
            mouse_action(&click, Some(Control::ScrollTop.hit_id()), &cfg),
            Some(Action::ScrollToTop)
        );
        assert_eq!(mouse_action(&click, None, &cfg), None);
        let release = MouseEvent::release(4, 1, MouseButton::Left);
        assert_eq!(mouse_action(&release, Some(Control::ScrollTop.hit_id()), &cfg), None);
    }

    #[test]
    fn test_event_action_only_hit_tests_clicks() {
        let cfg = ScrollConfig::default();
        let wheel = Event::Mouse(MouseEvent::from_button_code(65, 1, 1, true).unwrap());
        let action = event_action(&wheel, |_, _| panic!("wheel must not hit test"), &cfg);
        assert_eq!(action, Some(Action::ScrollLines(3)));

        let click = Event::Mouse(MouseEvent::press(2, 5, MouseButton::Left));
        let action = event_action(&click, |x, y| {
            assert_eq!((x, y), (2, 5));
            Some(Control::CarouselNext.hit_id())
        }, &cfg);
        assert_eq!(action, Some(Action::NextTestimonial));
    }
}
