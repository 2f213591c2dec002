//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (UART / USB-CDC in production, stderr on host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::RequestReceived(kind) => {
                info!("REQ | kind={:?}", kind);
            }
            AppEvent::OperationCompleted { succeeded: true, .. } => {
                info!("OPER | ok");
            }
            AppEvent::OperationCompleted { succeeded: false, reason } => match reason {
                Some(e) => warn!("OPER | failed: {}", e),
                None => warn!("OPER | failed"),
            },
            AppEvent::StatusRefreshed(status) => {
                info!("STATUS | 0b{:04b} | {}", status.bits(), status);
            }
            AppEvent::PowerFlagSet(on) => {
                info!("POWER | sticky={}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::RequestRejected(reason) => {
                warn!("REQ | rejected: {}", reason);
            }
        }
    }
}
