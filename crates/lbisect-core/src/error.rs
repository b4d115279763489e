//! Error types for the bisection engine.

use std::fmt;
use std::io;

/// Error kinds a [`crate::ByteReader`] or the bisection functions can report.
#[derive(Debug)]
pub enum Error {
    /// The underlying file descriptor could not be positioned with `seek`.
    ///
    /// Distinct from [`Error::Io`] only in its message; both map to the
    /// same exit code at the CLI boundary.
    NotSeekable,
    /// Any other kernel-reported failure on open, seek, read, or write,
    /// including a sink passed to `read_range` writing fewer bytes than
    /// it was given, which `Write::write_all` itself reports as an error.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotSeekable => write!(f, "input not seekable, cannot binary search"),
            Error::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::NotSeekable => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;
