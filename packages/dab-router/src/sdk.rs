//! Device API-level lookup, used to gate operations that only exist on
//! newer Android releases.
use dab_adb::{get_device_property, AdbResult};
use dab_config::BridgeConfig;

pub fn device_sdk_version(config: &BridgeConfig, serial: &str) -> AdbResult<u32> {
    let raw = get_device_property(config, serial, "ro.build.version.sdk")?;
    Ok(raw.trim().parse().unwrap_or(0))
}
