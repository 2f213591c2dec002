//! Unified error types for the coffee bridge.
//!
//! A single `Error` enum that every subsystem converts into, so the request
//! path can map any failure onto a response instead of escalating it.
//! All variants are `Copy` so they pass through the service and engine
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level bridge error
// ---------------------------------------------------------------------------

/// Every fallible operation in the bridge funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The request was malformed or carried an unrecognised tag.
    Format(FormatError),
    /// The appliance stayed silent for the whole read window.
    EmptyResponse,
    /// The serial channel itself reported an error.
    Serial(SerialError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "format: {e}"),
            Self::EmptyResponse => write!(f, "no response from appliance"),
            Self::Serial(e) => write!(f, "serial: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The protobuf envelope could not be decoded.
    Undecodable,
    /// The command tag is outside the known set.
    UnknownTag(i32),
    /// The operation payload is not exactly `BIN_CODE_LEN` bytes.
    CommandLength(usize),
    /// The operation payload embeds the CR LF pair that terminates a frame.
    EmbeddedLineEnd,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undecodable => write!(f, "undecodable request"),
            Self::UnknownTag(tag) => write!(f, "unknown command tag {tag}"),
            Self::CommandLength(len) => write!(f, "command length {len}"),
            Self::EmbeddedLineEnd => write!(f, "command embeds a line end"),
        }
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Serial errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// A byte could not be written to the UART.
    WriteFailed,
    /// A byte could not be read from the UART.
    ReadFailed,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "UART write failed"),
            Self::ReadFailed => write!(f, "UART read failed"),
        }
    }
}

impl From<SerialError> for Error {
    fn from(e: SerialError) -> Self {
        Self::Serial(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Bridge-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
