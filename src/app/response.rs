//! Response builder: maps a request kind and its outcome onto the answer.
//!
//! Pure mapping, no I/O. The RPC layer serializes the result.

use crate::machine::status::{ApplianceState, StatusBitmask};

use super::commands::RequestKind;

pub const DESC_OPERATION_SUCCEED: &str = "Operation SUCCEED";
pub const DESC_OPERATION_FAILED: &str = "Operation FAILED";
pub const DESC_FORMAT_UNKNOWN: &str = "Request format UNKNOWN";

/// The answer to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The operation reached the appliance and it answered.
    Ok,
    /// The operation failed; carries the status for diagnosis.
    OperationError(StatusBitmask),
    /// Answer to a status query.
    StatusResult(StatusBitmask),
    /// The request could not be interpreted.
    FormatError,
}

impl ResponseOutcome {
    /// Fixed human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => DESC_OPERATION_SUCCEED,
            Self::OperationError(_) => DESC_OPERATION_FAILED,
            Self::StatusResult(_) => "",
            Self::FormatError => DESC_FORMAT_UNKNOWN,
        }
    }

    /// Status byte attached to the response, if any.
    pub fn status(&self) -> Option<StatusBitmask> {
        match self {
            Self::OperationError(s) | Self::StatusResult(s) => Some(*s),
            Self::Ok | Self::FormatError => None,
        }
    }
}

/// Build the outcome for a request of `kind`.
///
/// `succeeded` only matters for operations.
pub fn build(kind: RequestKind, succeeded: bool, state: &ApplianceState) -> ResponseOutcome {
    match kind {
        RequestKind::Operation if succeeded => ResponseOutcome::Ok,
        RequestKind::Operation => ResponseOutcome::OperationError(state.status()),
        RequestKind::Query => ResponseOutcome::StatusResult(state.status()),
        RequestKind::Unknown => ResponseOutcome::FormatError,
    }
}
