//! Bridge configuration parameters
//!
//! All tunable parameters for the coffee bridge. The line timing defaults
//! are the values the appliance's serial interface was characterised with;
//! shortening them corrupts frames on real hardware.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::machine::poller::STS_CHK_TIME;

/// Core bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // --- Serial line timing ---
    /// Delay before every byte on the line (milliseconds)
    pub intra_byte_delay_ms: u32,
    /// Delay after every 4-byte group (milliseconds)
    pub inter_group_delay_ms: u32,
    /// Settle time between the end of a command and read-back (milliseconds)
    pub after_command_delay_ms: u32,

    // --- Status polling ---
    /// Number of status samples per refresh
    pub status_samples: u8,
    /// Settle time after each processed status sample (milliseconds)
    pub sample_settle_ms: u32,
    /// Re-poll the appliance before answering a failed operation
    pub refresh_status_on_failure: bool,

    // --- Interfaces ---
    /// UDP port the bridge listens on
    pub udp_port: u16,
    /// Appliance UART baud rate
    pub uart_baud: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            // Line timing
            intra_byte_delay_ms: 1,
            inter_group_delay_ms: 7,
            after_command_delay_ms: 100,

            // Status polling
            status_samples: STS_CHK_TIME,
            sample_settle_ms: 100,
            refresh_status_on_failure: true,

            // Interfaces
            udp_port: 8233,
            uart_baud: 9600,
        }
    }
}

impl BridgeConfig {
    /// Reject values the bridge cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.status_samples == 0 {
            return Err(Error::Config("status_samples must be at least 1"));
        }
        if self.udp_port == 0 {
            return Err(Error::Config("udp_port must be non-zero"));
        }
        if self.uart_baud == 0 {
            return Err(Error::Config("uart_baud must be non-zero"));
        }
        Ok(())
    }

    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json(doc: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(doc).map_err(|_| Error::Config("malformed JSON document"))?;
        config.validate()?;
        Ok(config)
    }
}
