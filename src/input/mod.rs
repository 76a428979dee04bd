//! Input parsing for terminal events.

mod event;
mod keyboard;
mod parser;

pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};

pub use crate::terminal::{MouseButton, MouseEvent, MouseEventKind};
