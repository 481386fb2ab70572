//! Owns the lifecycle of scrcpy sessions, one per device serial.
use std::collections::HashMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use dab_adb::{exec_adb, resolve_serial};
use dab_config::BridgeConfig;
use dab_wire::constants::METADATA_FRAME_LEN;

use crate::error::{SessionError, SessionResult};
use crate::handshake::connect_and_verify_dummy_byte;
use crate::metadata::parse_metadata_frame;
use crate::scid::{abstract_socket_name, generate_scid};
use crate::session::Session;

const SCRCPY_SERVER_CLASS: &str = "com.genymobile.scrcpy.Server";
const SCRCPY_SERVER_REMOTE_PATH: &str = "/data/local/tmp/scrcpy-server.jar";

/// Tracks every live session by device serial; the single entry point for
/// starting and stopping scrcpy control sessions.
pub struct SessionManager {
    config: BridgeConfig,
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionManager {
    pub fn new(config: BridgeConfig) -> Self {
        SessionManager {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the existing ready session for `serial`, resolving an
    /// unspecified serial against the attached device list but never
    /// starting a new session as a side effect. Session establishment is
    /// only ever triggered explicitly, via [`SessionManager::start_session`].
    pub fn get_ready(&self, serial: Option<&str>) -> SessionResult<Option<Arc<Session>>> {
        let serial = resolve_serial(&self.config, serial)?;
        Ok(self.get_ready_resolved(&serial))
    }

    /// Same as [`SessionManager::get_ready`] but against an already-resolved
    /// serial, so callers that resolved it themselves don't pay for a
    /// second `adb devices` round trip per operation.
    pub fn get_ready_resolved(&self, serial: &str) -> Option<Arc<Session>> {
        self.sessions
            .lock()
            .unwrap()
            .get(serial)
            .filter(|session| session.is_alive())
            .cloned()
    }

    /// Start a new session for `serial`, pushing the server jar, forwarding
    /// the control port, and completing the dual-socket handshake. This is
    /// the only place the session map gains an entry.
    pub fn start_session(&self, serial: &str) -> SessionResult<Arc<Session>> {
        let jar_path = self
            .config
            .scrcpy_server_path
            .as_ref()
            .ok_or(SessionError::ServerNotFound)?;

        exec_adb(
            &self.config,
            &[
                "-s",
                serial,
                "push",
                &jar_path.to_string_lossy(),
                SCRCPY_SERVER_REMOTE_PATH,
            ],
            self.config.adb_timeout,
        )?;

        let scid = generate_scid();
        let socket_name = abstract_socket_name(scid);

        exec_adb(
            &self.config,
            &[
                "-s",
                serial,
                "forward",
                &format!("tcp:{}", self.config.scrcpy_forward_port),
                &format!("localabstract:{socket_name}"),
            ],
            self.config.adb_timeout,
        )?;

        let server_version = self.config.scrcpy_server_version.clone();
        spawn_detached_server(&self.config, serial, scid, &server_version)?;

        let addr = format!("127.0.0.1:{}", self.config.scrcpy_forward_port);

        let mut video = connect_and_verify_dummy_byte(&addr, self.config.dummy_byte_budget)?;
        let mut control = connect_and_verify_dummy_byte(&addr, self.config.dummy_byte_budget)?;
        control.set_read_timeout(None)?;

        let mut frame = [0u8; METADATA_FRAME_LEN];
        video.set_read_timeout(Some(self.config.metadata_timeout))?;
        video
            .read_exact(&mut frame)
            .map_err(|_| SessionError::MetadataTimeout)?;
        let metadata = parse_metadata_frame(&frame);

        let session = Session::spawn(
            serial.to_string(),
            scid,
            server_version,
            metadata,
            control,
        )?;

        self.sessions
            .lock()
            .unwrap()
            .insert(serial.to_string(), session.clone());

        Ok(session)
    }

    /// Tear down a session: best-effort kill the device-side server,
    /// remove the port forward, drop the map entry. Idempotent.
    pub fn stop_session(&self, serial: &str) -> SessionResult<()> {
        self.sessions.lock().unwrap().remove(serial);

        let _ = exec_adb(
            &self.config,
            &["-s", serial, "shell", "pkill", "-f", "scrcpy-server"],
            self.config.adb_timeout,
        );
        let _ = exec_adb(
            &self.config,
            &[
                "-s",
                serial,
                "forward",
                "--remove",
                &format!("tcp:{}", self.config.scrcpy_forward_port),
            ],
            self.config.adb_timeout,
        );

        Ok(())
    }

    /// Register an already-constructed session directly, bypassing the
    /// push/forward/handshake sequence. Exists only so other crates' tests
    /// can exercise session-dependent code paths against a controlled
    /// session without a real device.
    #[cfg(feature = "test-support")]
    pub fn insert_session_for_test(&self, serial: &str, session: Arc<Session>) {
        self.sessions.lock().unwrap().insert(serial.to_string(), session);
    }
}

fn spawn_detached_server(
    config: &BridgeConfig,
    serial: &str,
    scid: u32,
    server_version: &str,
) -> SessionResult<()> {
    let scid_hex = crate::scid::scid_hex(scid);
    let class_path = format!("CLASSPATH={SCRCPY_SERVER_REMOTE_PATH}");

    Command::new(&config.adb_path)
        .args([
            "-s",
            serial,
            "shell",
            &class_path,
            "app_process",
            "/",
            SCRCPY_SERVER_CLASS,
            server_version,
            &format!("scid={scid_hex}"),
            "tunnel_forward=true",
            "control=true",
            "cleanup=false",
            "send_device_meta=true",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}
