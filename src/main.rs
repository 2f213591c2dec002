//! CoffeeBridge firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  UdpServer        LogEventSink     UartAdapter           │
//! │  (datagrams)      (EventSink)      (SerialPort)          │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ RpcEngine → BridgeService → TimedLink (codec)      │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use coffeebridge::adapters::log_sink::LogEventSink;
use coffeebridge::adapters::time::BlockingDelay;
use coffeebridge::adapters::uart::UartAdapter;
use coffeebridge::adapters::udp::UdpServer;
use coffeebridge::adapters::wifi;
use coffeebridge::app::service::BridgeService;
use coffeebridge::config::BridgeConfig;
use coffeebridge::machine::link::{LineTiming, TimedLink};
use coffeebridge::pins;

// ── Build-time settings ───────────────────────────────────────

const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(s) => s,
    None => "",
};
const WIFI_PASS: &str = match option_env!("WIFI_PASS") {
    Some(s) => s,
    None => "",
};

fn load_config() -> BridgeConfig {
    match option_env!("COFFEE_BRIDGE_CONFIG") {
        Some(doc) => BridgeConfig::from_json(doc).unwrap_or_else(|e| {
            warn!("Embedded config rejected ({}), using defaults", e);
            BridgeConfig::default()
        }),
        None => BridgeConfig::default(),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("CoffeeBridge v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();
    info!("Config: {:?}", config);

    // ── 2. Network ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let _wifi = wifi::connect(peripherals.modem, sysloop, nvs, WIFI_SSID, WIFI_PASS)
        .context("WiFi bring-up")?;

    // ── 3. Appliance line ─────────────────────────────────────
    let uart_config = UartConfig::new().baudrate(Hertz(config.uart_baud));
    let driver = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<esp_idf_hal::gpio::AnyIOPin>::None,
        Option::<esp_idf_hal::gpio::AnyIOPin>::None,
        &uart_config,
    )
    .context("UART init")?;
    info!(
        "UART{}: tx=GPIO{} rx=GPIO{} @ {} baud",
        pins::APPLIANCE_UART,
        pins::APPLIANCE_TX_GPIO,
        pins::APPLIANCE_RX_GPIO,
        config.uart_baud
    );

    let mut machine = TimedLink::new(
        UartAdapter::new(driver),
        BlockingDelay::new(),
        LineTiming::from(&config),
    );

    // ── 4. Serve ──────────────────────────────────────────────
    let mut app = BridgeService::new(&config);
    let mut sink = LogEventSink::new();
    let mut server = UdpServer::bind(config.udp_port).context("UDP bind")?;

    server.run(&mut app, &mut machine, &mut sink)
}
