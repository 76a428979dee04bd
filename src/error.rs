//! Error types for CryptoVault.

use std::fmt;
use std::io;

/// Result type alias for CryptoVault operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for CryptoVault operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal operations.
    Io(io::Error),
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Page or buffer dimension error (e.g., zero width/height).
    InvalidDimensions { width: u32, height: u32 },
    /// A section anchor that is not part of the page.
    UnknownSection(String),
    /// A carousel needs at least one item to rotate through.
    EmptyCarousel,
    /// A section tracker needs at least one declared section.
    NoSections,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::UnknownSection(id) => write!(f, "unknown section: {id}"),
            Self::EmptyCarousel => write!(f, "carousel has no items"),
            Self::NoSections => write!(f, "no sections declared"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
