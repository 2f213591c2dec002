//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (domain)
//! ```
//!
//! Driven adapters (UART, appliance link, event sinks) implement these
//! traits. The [`BridgeService`](super::service::BridgeService) consumes them
//! via generics, so the domain core never touches hardware directly.
//!
//! Blocking delays use [`embedded_hal::delay::DelayNs`] directly rather than
//! a port of their own.

use crate::error::SerialError;
use crate::machine::Reply;

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: raw byte channel to the appliance)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented serial channel.
pub trait SerialPort {
    /// Write a single byte to the line.
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError>;

    /// Read one byte if one is buffered. Never blocks.
    fn read_byte(&mut self) -> Result<Option<u8>, SerialError>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Machine port (driven adapter: command/reply transactions)
// ───────────────────────────────────────────────────────────────

/// Transaction-level access to the appliance.
///
/// One call sends a command and collects whatever the appliance answers
/// inside the read window. An empty [`Reply`] means the appliance stayed
/// silent; that is not an error.
pub trait MachinePort {
    /// Send `command` and return the decoded reply.
    fn transact(&mut self, command: &[u8]) -> Result<Reply, SerialError>;

    /// Block for `ms` milliseconds between transactions.
    fn settle(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
