//! `CryptoVault` - terminal landing page for a crypto wallet
//!
//! A single scrollable marketing page rendered with cell buffers, diffed ANSI
//! output and alpha blending. The behavior lives in [`page`]: a scroll-driven
//! section tracker, an auto-rotating testimonial carousel, smooth scrolling
//! and the fixed navigation header that ties them together.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for color math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow page::PageLayout etc
#![allow(clippy::struct_excessive_bools)] // Terminal state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod input;
pub mod page;
pub mod renderer;
pub mod style;
pub mod terminal;
pub mod unicode;

// Re-export core types at crate root
pub use cell::{Cell, CellContent};
pub use color::{Gradient, Rgba};
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};
pub use style::{Style, TextAttributes};

// Re-export input types
pub use input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers, MouseEvent};

// Re-export ANSI types
pub use ansi::ColorMode;

// Re-export commonly used types
pub use buffer::FrameBuffer;
pub use page::{LandingPage, PageConfig, SectionId};
pub use renderer::{HitGrid, RenderStats, Renderer, RendererOptions};
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
