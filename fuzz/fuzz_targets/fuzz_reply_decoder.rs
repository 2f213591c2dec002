//! Fuzz target: raw wire bytes → `TimedLink::read_timed`
//!
//! Feeds arbitrary receive-side bytes, including partial groups and
//! oversized replies, and asserts the reply never exceeds its capacity.
//!
//! cargo fuzz run fuzz_reply_decoder

#![no_main]

use std::collections::VecDeque;

use coffeebridge::app::ports::SerialPort;
use coffeebridge::config::BridgeConfig;
use coffeebridge::error::SerialError;
use coffeebridge::machine::RESP_MAX_LEN;
use coffeebridge::machine::codec::GROUP_LEN;
use coffeebridge::machine::link::{LineTiming, TimedLink};
use coffeebridge::machine::poller::StatusSample;
use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;

struct Wire(VecDeque<u8>);

impl SerialPort for Wire {
    fn write_byte(&mut self, _byte: u8) -> Result<(), SerialError> {
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        Ok(self.0.pop_front())
    }

    fn available(&self) -> bool {
        !self.0.is_empty()
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fuzz_target!(|data: &[u8]| {
    let mut link = TimedLink::new(
        Wire(data.iter().copied().collect()),
        NoDelay,
        LineTiming::from(&BridgeConfig::default()),
    );

    let reply = link.read_timed().expect("in-memory wire never fails");
    let groups = data.len().div_ceil(GROUP_LEN);
    assert!(reply.len() <= RESP_MAX_LEN);
    assert_eq!(reply.len(), groups.saturating_sub(2).min(RESP_MAX_LEN));
    assert!(link.port().0.is_empty(), "channel must be drained");

    let _ = StatusSample::parse(&reply);
});
