fn main() {
    println!("cargo:rerun-if-env-changed=COFFEE_BRIDGE_CONFIG");
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASS");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
