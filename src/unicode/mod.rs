//! Unicode utilities for grapheme handling, display width and wrapping.

mod grapheme;
mod width;
mod wrap;

pub use grapheme::graphemes;
pub use width::{display_width, display_width_char};
pub use wrap::{truncate_to_width, wrap_text};
