//! GPIO assignments for the bridge board.
//!
//! The appliance service port is a 3.3 V TTL UART; level shifting to the
//! appliance side is done on the board.

/// UART peripheral number wired to the appliance.
pub const APPLIANCE_UART: u8 = 1;
/// ESP32-S3 TX toward the appliance RX.
pub const APPLIANCE_TX_GPIO: i32 = 17;
/// ESP32-S3 RX from the appliance TX.
pub const APPLIANCE_RX_GPIO: i32 = 18;
