//! Application service: the hexagonal core.
//!
//! [`BridgeService`] owns the appliance state and the status poller. It
//! exposes a hardware-agnostic API; the appliance is reached only through a
//! [`MachinePort`] injected at call sites, so the whole service is testable
//! with mock adapters.
//!
//! ```text
//!  ParsedRequest ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                    │    BridgeService      │
//!  MachinePort  ◀──▶ │  state · poller       │ ──▶ ResponseOutcome
//!                    └──────────────────────┘
//! ```

use log::{info, warn};

use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::machine::commands::{TURN_OFF, TURN_ON};
use crate::machine::poller::StatusPoller;
use crate::machine::status::{ApplianceState, StatusBitmask};
use crate::machine::SemanticCommand;

use super::commands::ParsedRequest;
use super::events::AppEvent;
use super::ports::{EventSink, MachinePort};
use super::response::{self, ResponseOutcome};

// ───────────────────────────────────────────────────────────────
// BridgeService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct BridgeService {
    state: ApplianceState,
    poller: StatusPoller,
    refresh_on_failure: bool,
}

impl BridgeService {
    /// Construct the service from configuration. State starts empty.
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            state: ApplianceState::new(),
            poller: StatusPoller::new(config),
            refresh_on_failure: config.refresh_status_on_failure,
        }
    }

    // ── Request execution ─────────────────────────────────────

    /// Execute one classified request against the appliance.
    pub fn execute(
        &mut self,
        request: &ParsedRequest,
        machine: &mut impl MachinePort,
        sink: &mut impl EventSink,
    ) -> ResponseOutcome {
        let kind = request.kind();
        sink.emit(&AppEvent::RequestReceived(kind));

        let succeeded = match request {
            ParsedRequest::Operation(cmd) => {
                let result = self.operate(cmd, machine, sink);
                if result.is_err() && self.refresh_on_failure {
                    self.refresh_status(machine, sink);
                }
                result.is_ok()
            }
            ParsedRequest::Query => {
                self.refresh_status(machine, sink);
                true
            }
            ParsedRequest::Unknown(reason) => {
                sink.emit(&AppEvent::RequestRejected(*reason));
                false
            }
        };

        response::build(kind, succeeded, &self.state)
    }

    /// Send an operation and judge it by whether the appliance answered.
    pub fn operate(
        &mut self,
        cmd: &SemanticCommand,
        machine: &mut impl MachinePort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let result = match machine.transact(cmd.as_bytes()) {
            Ok(reply) if reply.is_empty() => Err(Error::EmptyResponse),
            Ok(_) => Ok(()),
            Err(e) => Err(Error::from(e)),
        };

        sink.emit(&AppEvent::OperationCompleted {
            succeeded: result.is_ok(),
            reason: result.err(),
        });

        if result.is_ok() {
            if cmd.starts_with(TURN_ON) {
                self.set_power(true, sink);
            } else if cmd.starts_with(TURN_OFF) {
                self.set_power(false, sink);
            }
        } else {
            warn!("Operation failed: {:?}", result);
        }
        result
    }

    /// Poll the appliance and update the status byte.
    pub fn refresh_status(
        &mut self,
        machine: &mut impl MachinePort,
        sink: &mut impl EventSink,
    ) -> StatusBitmask {
        let status = self.poller.refresh(machine, &mut self.state);
        sink.emit(&AppEvent::StatusRefreshed(status));
        status
    }

    // ── Power flag ────────────────────────────────────────────

    /// Explicitly set the sticky power flag.
    pub fn set_power(&mut self, on: bool, sink: &mut impl EventSink) {
        if self.state.power() != on {
            info!("Power flag -> {}", on);
        }
        self.state.set_power(on);
        sink.emit(&AppEvent::PowerFlagSet(on));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current appliance state.
    pub fn state(&self) -> &ApplianceState {
        &self.state
    }
}
