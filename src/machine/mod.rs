//! Appliance side of the bridge: line codec, timed serial link, and status
//! polling.
//!
//! ```text
//!  SemanticCommand ──▶ codec::encode ──▶ TimedLink ──▶ UART
//!                                            │
//!  Reply ◀── codec::decode ◀─────────────────┘
//!    │
//!    └──▶ StatusPoller ──▶ ApplianceState
//! ```

pub mod codec;
pub mod commands;
pub mod link;
pub mod poller;
pub mod status;

use crate::error::FormatError;

/// Length of a semantic command in bytes.
pub const BIN_CODE_LEN: usize = 28;

/// Maximum number of decoded reply bytes kept from one transaction.
pub const RESP_MAX_LEN: usize = 64;

/// Decoded appliance reply with the trailing CR LF already removed.
pub type Reply = heapless::Vec<u8, RESP_MAX_LEN>;

/// A fixed-length command vector, one byte per logical switch state.
///
/// The frame terminator is implicit: the codec appends it on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticCommand([u8; BIN_CODE_LEN]);

impl SemanticCommand {
    /// Build a command from exactly `BIN_CODE_LEN` bytes.
    ///
    /// Rejects any other length, and payloads containing CR LF, since the
    /// encoding of that pair is the frame marker.
    pub fn new(bytes: &[u8]) -> Result<Self, FormatError> {
        let raw: [u8; BIN_CODE_LEN] = bytes
            .try_into()
            .map_err(|_| FormatError::CommandLength(bytes.len()))?;
        if raw.windows(2).any(|w| w == codec::LINE_END) {
            return Err(FormatError::EmbeddedLineEnd);
        }
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the command begins with the given built-in command text.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }
}
