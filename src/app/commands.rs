//! Inbound requests to the application service.
//!
//! The RPC layer classifies every datagram into a [`ParsedRequest`] which
//! the [`BridgeService`](super::service::BridgeService) executes once.

use crate::error::FormatError;
use crate::machine::SemanticCommand;

/// The closed set of request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Send a command to the appliance.
    Operation,
    /// Report the appliance status.
    Query,
    /// Anything the bridge could not interpret.
    Unknown,
}

/// A classified request. Only operations carry a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRequest {
    Operation(SemanticCommand),
    Query,
    Unknown(FormatError),
}

impl ParsedRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Operation(_) => RequestKind::Operation,
            Self::Query => RequestKind::Query,
            Self::Unknown(_) => RequestKind::Unknown,
        }
    }

    pub fn payload(&self) -> Option<&SemanticCommand> {
        match self {
            Self::Operation(cmd) => Some(cmd),
            _ => None,
        }
    }
}
