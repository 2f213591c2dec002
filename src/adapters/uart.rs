//! UART adapter for the appliance service port.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps [`esp_idf_hal::uart::UartDriver`] with non-blocking
//! single-byte reads.
//! On host: a silent line that swallows writes and never has data, so the
//! bridge behaves exactly as it does with the appliance unplugged.

use crate::app::ports::SerialPort;
use crate::error::SerialError;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_hal::delay::NON_BLOCK;
    use esp_idf_hal::uart::UartDriver;
    use log::warn;

    use super::{SerialError, SerialPort};

    /// Appliance UART.
    pub struct UartAdapter<'d> {
        driver: UartDriver<'d>,
    }

    impl<'d> UartAdapter<'d> {
        pub fn new(driver: UartDriver<'d>) -> Self {
            Self { driver }
        }
    }

    impl SerialPort for UartAdapter<'_> {
        fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
            match self.driver.write(&[byte]) {
                Ok(1) => Ok(()),
                Ok(_) => Err(SerialError::WriteFailed),
                Err(e) => {
                    warn!("uart write: {}", e);
                    Err(SerialError::WriteFailed)
                }
            }
        }

        fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
            let mut buf = [0u8; 1];
            match self.driver.read(&mut buf, NON_BLOCK) {
                Ok(0) => Ok(None),
                Ok(_) => Ok(Some(buf[0])),
                Err(e) => {
                    warn!("uart read: {}", e);
                    Err(SerialError::ReadFailed)
                }
            }
        }

        fn available(&self) -> bool {
            self.driver.remaining_read().map(|n| n > 0).unwrap_or(false)
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::UartAdapter;

/// Host stand-in for the appliance UART.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct UartAdapter {
    written: usize,
}

#[cfg(not(target_os = "espidf"))]
impl UartAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes swallowed since construction.
    pub fn written(&self) -> usize {
        self.written
    }
}

#[cfg(not(target_os = "espidf"))]
impl SerialPort for UartAdapter {
    fn write_byte(&mut self, _byte: u8) -> Result<(), SerialError> {
        self.written += 1;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        Ok(None)
    }

    fn available(&self) -> bool {
        false
    }
}
