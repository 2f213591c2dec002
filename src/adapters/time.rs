//! Blocking delay adapter.
//!
//! - **`target_os = "espidf"`**: delegates to FreeRTOS `vTaskDelay` through
//!   [`esp_idf_hal::delay::FreeRtos`], yielding to other tasks while waiting.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep` for host-side
//!   runs.

use embedded_hal::delay::DelayNs;

/// Blocking delay provider for the appliance link.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockingDelay;

impl BlockingDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for BlockingDelay {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::FreeRtos.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for BlockingDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
