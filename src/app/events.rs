//! Outbound application events.
//!
//! The [`BridgeService`](super::service::BridgeService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use crate::error::{Error, FormatError};
use crate::machine::status::StatusBitmask;

use super::commands::RequestKind;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A request was classified and is about to execute.
    RequestReceived(RequestKind),

    /// An operation was sent to the appliance.
    OperationCompleted {
        succeeded: bool,
        reason: Option<Error>,
    },

    /// The status byte was refreshed from the appliance.
    StatusRefreshed(StatusBitmask),

    /// The sticky power flag changed.
    PowerFlagSet(bool),

    /// A request was rejected before touching the appliance.
    RequestRejected(FormatError),
}
