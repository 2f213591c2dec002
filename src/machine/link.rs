//! Timed serial link to the appliance.
//!
//! The appliance samples its line slowly, so every byte is preceded by a
//! short delay and every four-byte group is followed by a longer one:
//!
//! ```text
//!  write:  [intra b0 intra b1 intra b2 intra b3] inter inter  ... marker
//!          after_command
//!  read:   [intra b0 intra b1 intra b2 intra b3] inter  ... while available
//! ```
//!
//! Ordering of these delays is load-bearing; frames sent faster are dropped
//! or corrupted by the appliance.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{MachinePort, SerialPort};
use crate::config::BridgeConfig;
use crate::error::SerialError;

use super::codec::{self, GROUP_LEN, IDLE};
use super::{BIN_CODE_LEN, Reply};

/// Largest frame the link ever sends.
const MAX_FRAME_LEN: usize = codec::frame_len(BIN_CODE_LEN);

/// Trailing decoded bytes dropped from every reply (the appliance's CR LF).
const REPLY_TRAILER: usize = codec::LINE_END.len();

/// Line timing in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTiming {
    pub intra_ms: u32,
    pub inter_ms: u32,
    pub after_command_ms: u32,
}

impl From<&BridgeConfig> for LineTiming {
    fn from(c: &BridgeConfig) -> Self {
        Self {
            intra_ms: c.intra_byte_delay_ms,
            inter_ms: c.inter_group_delay_ms,
            after_command_ms: c.after_command_delay_ms,
        }
    }
}

/// Serial transport adapter: codec framing plus line timing over a raw port.
pub struct TimedLink<S, D> {
    port: S,
    delay: D,
    timing: LineTiming,
}

impl<S: SerialPort, D: DelayNs> TimedLink<S, D> {
    pub fn new(port: S, delay: D, timing: LineTiming) -> Self {
        Self {
            port,
            delay,
            timing,
        }
    }

    pub fn port(&self) -> &S {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut S {
        &mut self.port
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Write an already-encoded frame, group by group.
    pub fn write_timed(&mut self, frame: &[u8]) -> Result<(), SerialError> {
        for group in frame.chunks(GROUP_LEN) {
            for &byte in group {
                self.delay.delay_ms(self.timing.intra_ms);
                self.port.write_byte(byte)?;
            }
            self.delay.delay_ms(self.timing.inter_ms);
            self.delay.delay_ms(self.timing.inter_ms);
        }
        Ok(())
    }

    /// Drain the channel, decoding one group at a time.
    ///
    /// A group cut short by a dry channel is padded with idle bytes. Decoded
    /// bytes beyond the reply capacity are read and dropped. A read error
    /// does not stop the drain: the rest of the reply is discarded so the
    /// next transaction starts on a group boundary, then the error is
    /// returned.
    pub fn read_timed(&mut self) -> Result<Reply, SerialError> {
        let mut decoded = Reply::new();
        let mut total = 0usize;
        let mut failure = None;

        while self.port.available() {
            let mut group = [IDLE; GROUP_LEN];
            for slot in &mut group {
                self.delay.delay_ms(self.timing.intra_ms);
                match self.port.read_byte() {
                    Ok(Some(byte)) => *slot = byte,
                    Ok(None) => {}
                    Err(e) => {
                        failure.get_or_insert(e);
                    }
                }
            }
            self.delay.delay_ms(self.timing.inter_ms);

            total += 1;
            // Past capacity: keep draining, drop the byte.
            let _ = decoded.push(codec::decode(group));
        }

        if let Some(e) = failure {
            debug!("link: read failed, {} groups discarded", total);
            return Err(e);
        }
        if total > decoded.len() {
            let dropped = total - decoded.len();
            debug!("link: reply overflow, {} bytes dropped", dropped);
        }

        // The trailer is the last two bytes received, which may already have
        // been dropped as overflow.
        let keep = total.saturating_sub(REPLY_TRAILER).min(decoded.len());
        decoded.truncate(keep);
        Ok(decoded)
    }
}

impl<S: SerialPort, D: DelayNs> MachinePort for TimedLink<S, D> {
    fn transact(&mut self, command: &[u8]) -> Result<Reply, SerialError> {
        let mut frame = [IDLE; MAX_FRAME_LEN];
        let len = codec::encode_into(command, &mut frame);

        self.write_timed(&frame[..len])?;
        self.delay.delay_ms(self.timing.after_command_ms);

        let reply = self.read_timed()?;
        debug!("link: sent {} bytes, reply {} bytes", len, reply.len());
        Ok(reply)
    }

    fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
