//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                  |
//! |------------|-------------------|------------------------------|
//! | `uart`     | SerialPort        | Appliance service UART       |
//! | `time`     | DelayNs           | FreeRTOS tick / host sleep   |
//! | `log_sink` | EventSink         | Serial log output            |
//! | `udp`      | (driving adapter) | UDP socket on the LAN        |
//! | `wifi`     | (bring-up only)   | ESP-IDF WiFi STA             |

pub mod log_sink;
pub mod time;
pub mod uart;
pub mod udp;
#[cfg(target_os = "espidf")]
pub mod wifi;
