//! RPC engine: the single entry point from a raw datagram to a raw answer.
//!
//! **Transport-decoupled**: the engine does not own a socket. Callers feed a
//! datagram via [`RpcEngine::handle_request`] and send back the returned
//! bytes. Every input produces an answer; nothing in here fails.

use log::{debug, info};
use prost::Message;

use crate::app::ports::{EventSink, MachinePort};
use crate::app::response::ResponseOutcome;
use crate::app::service::BridgeService;

use super::classify::parse_request;
use super::messages::Response;

/// Running request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub handled: u32,
    pub format_errors: u32,
    pub operation_errors: u32,
}

/// Decode → classify → execute → encode.
#[derive(Default)]
pub struct RpcEngine {
    stats: EngineStats,
}

impl RpcEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one raw request and return the serialized response.
    pub fn handle_request(
        &mut self,
        raw: &[u8],
        app: &mut BridgeService,
        machine: &mut impl MachinePort,
        sink: &mut impl EventSink,
    ) -> Vec<u8> {
        let request = parse_request(raw);
        debug!("rpc: {} bytes -> {:?}", raw.len(), request.kind());

        let outcome = app.execute(&request, machine, sink);
        self.record(&outcome);

        let response = Response::from(&outcome);
        response.encode_to_vec()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    fn record(&mut self, outcome: &ResponseOutcome) {
        self.stats.handled = self.stats.handled.wrapping_add(1);
        match outcome {
            ResponseOutcome::FormatError => {
                self.stats.format_errors = self.stats.format_errors.wrapping_add(1);
            }
            ResponseOutcome::OperationError(_) => {
                self.stats.operation_errors = self.stats.operation_errors.wrapping_add(1);
            }
            ResponseOutcome::Ok | ResponseOutcome::StatusResult(_) => {}
        }
        if self.stats.handled % 100 == 0 {
            info!(
                "rpc: {} requests, {} format errors, {} operation errors",
                self.stats.handled, self.stats.format_errors, self.stats.operation_errors
            );
        }
    }
}
