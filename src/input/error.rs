//! Settings input errors.

use std::convert::From;
use std::error;
use std::fmt;
use std::fmt::Display;

/// Errors from reading settings from provided input.
#[derive(Debug)]
pub enum Error {
    /// Input format error with provided input.
    Format(String),
    /// I/O error.
    IO(std::io::Error),
    /// Input was written for a different settings version.
    Version(i64),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Error::*;
        match self {
            IO(ref e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;
        match self {
            Format(ref msg) => write!(f, "input format error: {}", msg),
            IO(ref e) => write!(f, "I/O error: {}", e),
            Version(ver) => write!(f, "settings not compatible (provided: {}, required: {})",
                                   ver, super::json::SETTINGS_VERSION),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e)
    }
}
