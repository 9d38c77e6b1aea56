//! Error definitions for trace loading.
//!
//! The engine itself is total over parsed programs (unknown opcodes become
//! NOPs, malformed operands become absent), so the only fatal conditions
//! live at the loading front door: unreadable input, an invalid JSON
//! payload, a payload of the wrong shape, or a trace that parses to nothing.

use std::fmt;
use std::io;

/// Fatal condition raised while turning caller input into a program.
#[derive(Debug)]
pub enum LoadError {
    /// The trace file could not be read.
    Io(io::Error),

    /// The standard-input payload was not valid JSON.
    Json(serde_json::Error),

    /// The JSON payload did not have the expected
    /// `{"instructions": [...]}` shape. The message names the offending
    /// part.
    Payload(String),

    /// No instructions survived parsing (empty input, or comments and
    /// blank lines only).
    EmptyTrace,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "could not read trace: {}", err),
            LoadError::Json(err) => write!(f, "invalid JSON input: {}", err),
            LoadError::Payload(msg) => write!(f, "invalid payload: {}", msg),
            LoadError::EmptyTrace => write!(f, "no instructions loaded from input"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}
