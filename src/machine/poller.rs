//! Status polling: turns several noisy `IC:` replies into one status byte.
//!
//! The reply to `IC:` is an ASCII register dump. Two characters matter:
//!
//! | Offset | Meaning                | Decoding                              |
//! |--------|------------------------|---------------------------------------|
//! | 4      | power sample           | bit 1 **clear** = power present       |
//! | 6      | resource nibble (hex)  | bit 1 set = water absent, bit 0 set = tray present |
//!
//! Aggregation across samples is deliberately asymmetric: water is reported
//! available only if *no* sample showed it absent, while the tray is reported
//! present if *any* sample saw it. The polled power signal is unreliable on
//! this hardware; it is counted but the reported power bit comes from the
//! sticky flag in [`ApplianceState`].

use log::debug;

use crate::app::ports::MachinePort;
use crate::config::BridgeConfig;

use super::commands::STATUS_QUERY;
use super::status::{ApplianceState, Capability, StatusBitmask};

/// Offset of the power sample in an `IC:` reply.
pub const MEM_PWR_IDX: usize = 4;
/// Offset of the resource nibble in an `IC:` reply.
pub const MEM_RSC_IDX: usize = 6;
/// Default number of samples per refresh.
pub const STS_CHK_TIME: u8 = 3;

const POWER_AND_FLG: u8 = 0x02;
const WATER_AND_FLG: u8 = 0x02;
const WATER_OFFSET: u8 = 1;
const TRAY_AND_FLG: u8 = 0x01;
const TRAY_OFFSET: u8 = 0;

/// Decode an uppercase hex digit. Anything else decodes to 0.
pub fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// What one `IC:` reply says about the appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSample {
    pub power_present: bool,
    pub water_absent: bool,
    pub tray_present: bool,
}

impl StatusSample {
    /// Interpret a non-empty reply. Offsets past the end read as 0.
    pub fn parse(reply: &[u8]) -> Self {
        let power = reply.get(MEM_PWR_IDX).copied().unwrap_or(0);
        let resource = hex_nibble(reply.get(MEM_RSC_IDX).copied().unwrap_or(0));

        Self {
            power_present: power & POWER_AND_FLG == 0,
            water_absent: (resource & WATER_AND_FLG) >> WATER_OFFSET != 0,
            tray_present: (resource & TRAY_AND_FLG) >> TRAY_OFFSET != 0,
        }
    }
}

/// Per-refresh sample counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleTally {
    pub taken: u8,
    pub power: u8,
    pub water_absent: u8,
    pub tray_present: u8,
}

impl SampleTally {
    pub fn add(&mut self, sample: StatusSample) {
        self.taken += 1;
        self.power += u8::from(sample.power_present);
        self.water_absent += u8::from(sample.water_absent);
        self.tray_present += u8::from(sample.tray_present);
    }

    /// Fold the counters into a status byte, taking power from `sticky_power`.
    pub fn resolve(&self, sticky_power: bool) -> StatusBitmask {
        StatusBitmask::empty()
            .with(Capability::Power, sticky_power)
            .with(Capability::Water, self.water_absent == 0)
            .with(Capability::Beans, true)
            .with(Capability::Tray, self.tray_present > 0)
    }
}

/// Status aggregator.
pub struct StatusPoller {
    samples: u8,
    settle_ms: u32,
}

impl StatusPoller {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            samples: config.status_samples,
            settle_ms: config.sample_settle_ms,
        }
    }

    /// Send the status query `samples` times and tally every usable reply.
    ///
    /// Silent or failed transactions are skipped without a settle delay.
    pub fn poll(&self, machine: &mut impl MachinePort) -> SampleTally {
        let mut tally = SampleTally::default();

        for attempt in 0..self.samples {
            let reply = match machine.transact(STATUS_QUERY) {
                Ok(reply) if !reply.is_empty() => reply,
                Ok(_) => {
                    debug!("poll {}: no reply", attempt);
                    continue;
                }
                Err(e) => {
                    debug!("poll {}: {}", attempt, e);
                    continue;
                }
            };

            let sample = StatusSample::parse(&reply);
            debug!("poll {}: {:?}", attempt, sample);
            tally.add(sample);
            machine.settle(self.settle_ms);
        }

        tally
    }

    /// Poll the appliance, update `state`, and return the new status byte.
    ///
    /// With no usable sample at all, water reads as available and the tray
    /// as missing.
    pub fn refresh(
        &self,
        machine: &mut impl MachinePort,
        state: &mut ApplianceState,
    ) -> StatusBitmask {
        let tally = self.poll(machine);
        debug!(
            "poll: {}/{} samples, polled power {} (ignored), water absent {}, tray {}",
            tally.taken, self.samples, tally.power, tally.water_absent, tally.tray_present
        );

        let status = tally.resolve(state.power());
        state.set_status(status);
        status
    }
}
