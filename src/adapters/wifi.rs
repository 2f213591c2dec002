//! WiFi station-mode bring-up (ESP-IDF only).
//!
//! The bridge needs exactly one thing from the network stack: an IP address
//! on the appliance's LAN. Credentials are baked in at build time through
//! `WIFI_SSID` / `WIFI_PASS`.

use anyhow::{Result, anyhow};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

/// Connect to `ssid` and block until the interface has an address.
///
/// The returned handle must stay alive for the connection to persist.
pub fn connect(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> Result<BlockingWifi<EspWifi<'static>>> {
    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sysloop.clone(), Some(nvs))?, sysloop)?;

    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid
            .try_into()
            .map_err(|_| anyhow!("SSID longer than 32 bytes"))?,
        password: password
            .try_into()
            .map_err(|_| anyhow!("password longer than 64 bytes"))?,
        auth_method,
        ..Default::default()
    }))?;

    wifi.start()?;
    info!("WiFi: connecting to '{}'", ssid);
    wifi.connect()?;
    wifi.wait_netif_up()?;

    let ip = wifi.wifi().sta_netif().get_ip_info()?;
    info!("WiFi: up, address {}", ip.ip);
    Ok(wifi)
}
