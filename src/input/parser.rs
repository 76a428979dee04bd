//! ANSI sequence parser for terminal input.
//!
//! [`InputParser::parse`] decodes one event from the front of a byte slice.
//! [`InputParser::feed`] wraps it for streaming reads: bytes of a sequence
//! split across two reads stay pending until the rest arrives, and a lone
//! `ESC` is only reported as the Escape key by [`InputParser::flush_pending`]
//! once the input has gone quiet.
//!
//! Supported: printable and control keys, UTF-8, `CSI` cursor and tilde keys
//! with xterm modifiers, `SS3` keys, SGR (1006) and X10 mouse reports, focus
//! reports and `CSI 8 ; rows ; cols t` size reports.

#![allow(clippy::unused_self)]

use crate::input::event::{Event, ResizeEvent};
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::terminal::MouseEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    /// The input ends inside a sequence.
    Incomplete,
    /// A complete sequence with no meaning here; the bytes are its length.
    UnrecognizedSequence(Vec<u8>),
    InvalidUtf8,
}

/// The event and the number of bytes it consumed.
pub type ParseResult = Result<(Event, usize), ParseError>;

/// Unterminated sequences longer than this are treated as noise.
const MAX_SEQUENCE_LEN: usize = 64;

#[derive(Clone, Debug, Default)]
pub struct InputParser {
    pending: Vec<u8>,
}

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one event from the start of `input`.
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        match first {
            0x1b => self.parse_escape(input),
            0x00 => Ok((KeyEvent::key(KeyCode::Null).into(), 1)),
            b'\t' => Ok((KeyEvent::key(KeyCode::Tab).into(), 1)),
            b'\r' | b'\n' => Ok((KeyEvent::key(KeyCode::Enter).into(), 1)),
            0x08 | 0x7f => Ok((KeyEvent::key(KeyCode::Backspace).into(), 1)),
            0x01..=0x1a => {
                let c = (first - 1 + b'a') as char;
                Ok((KeyEvent::with_ctrl(KeyCode::Char(c)).into(), 1))
            }
            0x20..=0x7e => Ok((KeyEvent::char(first as char).into(), 1)),
            0x80..=0xff => self.parse_utf8(input),
            _ => Err(ParseError::UnrecognizedSequence(vec![first])),
        }
    }

    /// Append bytes from a read and return every complete event.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            match self.parse(&self.pending[pos..]) {
                Ok((event, used)) => {
                    events.push(event);
                    pos += used;
                }
                Err(ParseError::Incomplete) => {
                    if self.pending.len() - pos > MAX_SEQUENCE_LEN {
                        pos = self.pending.len();
                    }
                    break;
                }
                Err(ParseError::UnrecognizedSequence(seq)) => pos += seq.len().max(1),
                Err(ParseError::InvalidUtf8 | ParseError::Empty) => pos += 1,
            }
        }
        self.pending.drain(..pos);
        events
    }

    /// Resolve pending bytes once no more input is coming.
    ///
    /// A pending `ESC` becomes the Escape key and whatever follows it is
    /// parsed again; a truncated UTF-8 character is dropped.
    pub fn flush_pending(&mut self) -> Vec<Event> {
        let pending = std::mem::take(&mut self.pending);
        match pending.split_first() {
            Some((0x1b, rest)) => {
                let mut events = vec![Event::Key(KeyEvent::key(KeyCode::Esc))];
                events.extend(self.feed(rest));
                events
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        let Some(&second) = input.get(1) else {
            return Err(ParseError::Incomplete);
        };

        match second {
            b'[' => self.parse_csi(input),
            b'O' => self.parse_ss3(input),
            0x1b => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
            0x20..=0x7e => {
                let key = KeyEvent::new(KeyCode::Char(second as char), KeyModifiers::ALT);
                Ok((key.into(), 2))
            }
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    /// `ESC [ params final`, with the X10 mouse payload after `ESC [ M`.
    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        let Some(offset) = input[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
            return Err(ParseError::Incomplete);
        };
        let end = 2 + offset;
        let params = &input[2..end];
        let seq = &input[..=end];

        let event = match input[end] {
            b'M' if params.is_empty() => return self.parse_x10_mouse(input),
            b'M' | b'm' if params.first() == Some(&b'<') => {
                self.parse_sgr_mouse(&params[1..], input[end] == b'M')
            }
            b'A' => self.modified_key(params, KeyCode::Up),
            b'B' => self.modified_key(params, KeyCode::Down),
            b'C' => self.modified_key(params, KeyCode::Right),
            b'D' => self.modified_key(params, KeyCode::Left),
            b'H' => self.modified_key(params, KeyCode::Home),
            b'F' => self.modified_key(params, KeyCode::End),
            b'Z' => Some(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT).into()),
            b'~' => self.tilde_key(params),
            b't' => self.parse_resize(params),
            _ => None,
        };

        event
            .map(|event| (event, seq.len()))
            .ok_or_else(|| ParseError::UnrecognizedSequence(seq.to_vec()))
    }

    fn modified_key(&self, params: &[u8], code: KeyCode) -> Option<Event> {
        let values = parse_params(params)?;
        let modifiers = match values.as_slice() {
            [] | [_] => KeyModifiers::empty(),
            [_, m, ..] => KeyModifiers::from_xterm_param(u8::try_from(*m).unwrap_or(1)),
        };
        Some(KeyEvent::new(code, modifiers).into())
    }

    fn tilde_key(&self, params: &[u8]) -> Option<Event> {
        let values = parse_params(params)?;
        let (&number, rest) = values.split_first()?;
        let modifiers = rest
            .first()
            .map_or(KeyModifiers::empty(), |&m| {
                KeyModifiers::from_xterm_param(u8::try_from(m).unwrap_or(1))
            });

        let code = match number {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11..=15 => KeyCode::F((number - 10) as u8),
            17..=21 => KeyCode::F((number - 11) as u8),
            23 | 24 => KeyCode::F((number - 12) as u8),
            _ => return None,
        };
        Some(KeyEvent::new(code, modifiers).into())
    }

    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        let Some(&byte) = input.get(2) else {
            return Err(ParseError::Incomplete);
        };

        let code = match byte {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
        };
        Ok((KeyEvent::key(code).into(), 3))
    }

    /// `ESC [ M cb cx cy`: every byte is offset by 32, coordinates are 1-based.
    fn parse_x10_mouse(&self, input: &[u8]) -> ParseResult {
        let Some(payload) = input.get(3..6) else {
            return Err(ParseError::Incomplete);
        };
        let code = u32::from(payload[0].saturating_sub(32));
        let x = u32::from(payload[1].saturating_sub(33));
        let y = u32::from(payload[2].saturating_sub(33));

        MouseEvent::from_button_code(code, x, y, true)
            .map(|event| (event.into(), 6))
            .ok_or_else(|| ParseError::UnrecognizedSequence(input[..6].to_vec()))
    }

    /// `ESC [ < b ; x ; y M` (press) or `... m` (release), 1-based coordinates.
    fn parse_sgr_mouse(&self, params: &[u8], pressed: bool) -> Option<Event> {
        let values = parse_params(params)?;
        let [code, x, y] = values.as_slice() else {
            return None;
        };
        MouseEvent::from_button_code(*code, x.saturating_sub(1), y.saturating_sub(1), pressed)
            .map(Event::Mouse)
    }

    fn parse_resize(&self, params: &[u8]) -> Option<Event> {
        let values = parse_params(params)?;
        let [8, rows, cols] = values.as_slice() else {
            return None;
        };
        let width = u16::try_from(*cols).ok()?;
        let height = u16::try_from(*rows).ok()?;
        Some(ResizeEvent::new(width, height).into())
    }

    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];
        let len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };

        let Some(bytes) = input.get(..len) else {
            return Err(ParseError::Incomplete);
        };
        let s = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;
        Ok((KeyEvent::char(c).into(), len))
    }
}

/// Split `1;5` style parameters. Empty input gives no values.
fn parse_params(params: &[u8]) -> Option<Vec<u32>> {
    if params.is_empty() {
        return Some(Vec::new());
    }
    std::str::from_utf8(params)
        .ok()?
        .split(';')
        .map(|part| part.parse().ok())
        .collect()
}
