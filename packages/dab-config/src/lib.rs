//! Process-wide configuration for the device-automation bridge.
//!
//! Everything here is read once at startup from the environment and threaded
//! down to the crates that need it, rather than re-read per call.
use std::{path::PathBuf, time::Duration};

/// Default scrcpy control-protocol version string; the device-side server
/// strictly compares this against its own build and exits on mismatch.
pub const DEFAULT_SCRCPY_VERSION: &str = "3.3.4";

/// Host TCP port used for the scrcpy forward tunnel. Fixed per-process: a
/// second concurrent session on a different device would collide on it, see
/// the "fixed host port" open question.
pub const DEFAULT_SCRCPY_PORT: u16 = 27183;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Path to the `adb` executable, or bare `adb` to resolve via `PATH`.
    pub adb_path: String,
    /// Path to the scrcpy server jar on the host, if located.
    pub scrcpy_server_path: Option<PathBuf>,
    /// Version string passed to the pushed server and compared against it.
    pub scrcpy_server_version: String,
    /// Timeout for one-shot ADB subprocess invocations.
    pub adb_timeout: Duration,
    /// Host port used for the scrcpy forward tunnel.
    pub scrcpy_forward_port: u16,
    /// Total retry budget for dummy-byte verification during session start.
    pub dummy_byte_budget: Duration,
    /// Timeout for receiving the 76-byte device metadata frame.
    pub metadata_timeout: Duration,
    /// Timeout for a pending clipboard-get reply.
    pub clipboard_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            adb_path: "adb".to_string(),
            scrcpy_server_path: None,
            scrcpy_server_version: DEFAULT_SCRCPY_VERSION.to_string(),
            adb_timeout: Duration::from_secs(30),
            scrcpy_forward_port: DEFAULT_SCRCPY_PORT,
            dummy_byte_budget: Duration::from_secs(10),
            metadata_timeout: Duration::from_secs(5),
            clipboard_timeout: Duration::from_secs(2),
        }
    }
}

impl BridgeConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// `SCRCPY_SERVER_PATH` is taken verbatim if set; otherwise well-known
    /// paths under `HOME`/`USERPROFILE` are probed by [`Self::locate_server_jar`].
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(adb_path) = std::env::var("ADB_PATH") {
            config.adb_path = adb_path;
        }
        if let Ok(version) = std::env::var("SCRCPY_SERVER_VERSION") {
            config.scrcpy_server_version = version;
        }
        config.scrcpy_server_path = std::env::var("SCRCPY_SERVER_PATH")
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.is_file())
            .or_else(Self::locate_server_jar);

        config
    }

    /// Probe well-known install locations for `scrcpy-server.jar`.
    fn locate_server_jar() -> Option<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()?;
        let candidates = [
            PathBuf::from(&home).join(".local/share/scrcpy/scrcpy-server.jar"),
            PathBuf::from(&home).join("scrcpy/scrcpy-server.jar"),
            PathBuf::from("/usr/share/scrcpy/scrcpy-server.jar"),
            PathBuf::from("/usr/local/share/scrcpy/scrcpy-server.jar"),
        ];
        candidates.into_iter().find(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_spec_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.adb_path, "adb");
        assert_eq!(config.scrcpy_server_version, DEFAULT_SCRCPY_VERSION);
        assert_eq!(config.scrcpy_forward_port, DEFAULT_SCRCPY_PORT);
        assert_eq!(config.adb_timeout, Duration::from_secs(30));
        assert_eq!(config.dummy_byte_budget, Duration::from_secs(10));
        assert_eq!(config.metadata_timeout, Duration::from_secs(5));
        assert_eq!(config.clipboard_timeout, Duration::from_secs(2));
    }
}
