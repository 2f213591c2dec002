//! Mock appliance for integration tests.
//!
//! Sits on the far side of a [`TimedLink`]: it records every frame the
//! bridge writes and, once a frame's end marker arrives, queues the next
//! scripted reply on the receive side, encoded the way the appliance sends
//! it.

use std::collections::VecDeque;

use coffeebridge::app::events::AppEvent;
use coffeebridge::app::ports::{EventSink, SerialPort};
use coffeebridge::config::BridgeConfig;
use coffeebridge::error::SerialError;
use coffeebridge::machine::codec::{self, GROUP_LEN, LINE_END, MARKER};
use coffeebridge::machine::link::{LineTiming, TimedLink};
use coffeebridge::machine::SemanticCommand;
use coffeebridge::machine::BIN_CODE_LEN;
use embedded_hal::delay::DelayNs;

// ── MockAppliance ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockAppliance {
    /// Every byte written by the bridge.
    pub tx: Vec<u8>,
    /// Decoded commands, one per completed frame, without the terminator.
    pub commands: Vec<Vec<u8>>,
    pending: Vec<u8>,
    rx: VecDeque<u8>,
    replies: VecDeque<Option<Vec<u8>>>,
    reads: usize,
    fail_on_read: Option<usize>,
}

#[allow(dead_code)]
impl MockAppliance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the payload of the next reply (CR LF is added on the wire).
    pub fn reply(&mut self, payload: &[u8]) -> &mut Self {
        self.replies.push_back(Some(payload.to_vec()));
        self
    }

    /// Queue a transaction the appliance leaves unanswered.
    pub fn silence(&mut self) -> &mut Self {
        self.replies.push_back(None);
        self
    }

    /// Make the `nth` read from now (1-based) report a UART fault.
    pub fn fail_read(&mut self, nth: usize) -> &mut Self {
        self.fail_on_read = Some(self.reads + nth);
        self
    }

    /// Bytes still waiting on the receive side.
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    /// Commands whose text equals `text`.
    pub fn count(&self, text: &[u8]) -> usize {
        self.commands.iter().filter(|c| c.as_slice() == text).count()
    }

    fn frame_complete(&mut self) {
        let mut decoded = codec::decode_groups(&self.pending);
        decoded.truncate(decoded.len().saturating_sub(LINE_END.len()));
        self.commands.push(decoded);
        self.pending.clear();

        if let Some(Some(payload)) = self.replies.pop_front() {
            self.rx.extend(codec::encode(&payload));
        }
    }
}

impl SerialPort for MockAppliance {
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        self.tx.push(byte);
        self.pending.push(byte);
        if self.pending.len() % GROUP_LEN == 0 && self.pending.ends_with(&MARKER) {
            self.frame_complete();
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        self.reads += 1;
        let byte = self.rx.pop_front();
        if self.fail_on_read == Some(self.reads) {
            return Err(SerialError::ReadFailed);
        }
        Ok(byte)
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}

// ── RecordingDelay ────────────────────────────────────────────

/// Virtual clock: accumulates requested delays instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ms: u64,
    pub calls: usize,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += u64::from(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

pub type MockLink = TimedLink<MockAppliance, RecordingDelay>;

pub fn link(config: &BridgeConfig) -> MockLink {
    TimedLink::new(
        MockAppliance::new(),
        RecordingDelay::default(),
        LineTiming::from(config),
    )
}

/// A 28-byte command starting with `text`, padded with spaces.
#[allow(dead_code)]
pub fn command(text: &[u8]) -> SemanticCommand {
    let mut raw = [b' '; BIN_CODE_LEN];
    raw[..text.len()].copy_from_slice(text);
    SemanticCommand::new(&raw).unwrap()
}

/// An `IC:` reply with power present and the given resource nibble.
#[allow(dead_code)]
pub fn status_reply(resource: u8) -> Vec<u8> {
    let mut r = b"IC:000000000".to_vec();
    r[6] = resource;
    r
}
