//! Routes each high-level operation to the scrcpy control socket when a
//! session is available, falling back to an ADB shell command otherwise.
//! Any transport error thrown by the scrcpy path is caught, logged, and
//! treated exactly like "no active session" rather than propagated — the
//! ADB fallback must still complete the operation.
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use dab_adb::{exec_adb_shell, AdbResult};
use dab_config::BridgeConfig;
use dab_session::{Session, SessionError, SessionManager};
use dab_wire::codec;
use dab_wire::constants::{key_action, motion_action};
use tracing::warn;

use crate::clipboard::parse_clipboard_dump;
use crate::error::{RouterError, RouterResult};
use crate::keycodes::lookup_keycode;
use crate::sdk::device_sdk_version;
use crate::shell_escape::escape_for_input_text;

const PRIMARY_BUTTON: u32 = 1;
const KEY_EVENT_HOLD: Duration = Duration::from_millis(10);

#[derive(Clone)]
pub struct Router {
    config: BridgeConfig,
    sessions: Arc<SessionManager>,
}

impl Router {
    pub fn new(config: BridgeConfig, sessions: Arc<SessionManager>) -> Self {
        Router { config, sessions }
    }

    /// Looks up an existing `Ready` session only; never starts one. Session
    /// establishment is the explicit, separate `startSession` action.
    fn ready_session(&self, serial: &str) -> Option<Arc<Session>> {
        self.sessions.get_ready_resolved(serial)
    }

    fn resolve(&self, serial: Option<&str>) -> AdbResult<String> {
        dab_adb::resolve_serial(&self.config, serial)
    }

    fn sdk_or_zero(&self, serial: &str) -> u32 {
        device_sdk_version(&self.config, serial).unwrap_or(0)
    }

    pub fn tap(&self, serial: Option<&str>, x: i32, y: i32) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            match Self::scrcpy_tap(&session, x, y) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy tap failed, falling back to adb"),
            }
        }

        exec_adb_shell(
            &self.config,
            &resolved,
            &format!("input tap {x} {y}"),
            self.config.adb_timeout,
        )?;
        Ok(())
    }

    fn scrcpy_tap(session: &Session, x: i32, y: i32) -> Result<(), SessionError> {
        let (w, h) = (session.metadata.width as u16, session.metadata.height as u16);
        session.send_control_message(&codec::inject_touch(
            motion_action::DOWN,
            0,
            x,
            y,
            w,
            h,
            1.0,
            PRIMARY_BUTTON,
            PRIMARY_BUTTON,
        ))?;
        session.send_control_message(&codec::inject_touch(
            motion_action::UP,
            0,
            x,
            y,
            w,
            h,
            0.0,
            PRIMARY_BUTTON,
            PRIMARY_BUTTON,
        ))
    }

    pub fn swipe(
        &self,
        serial: Option<&str>,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u32,
    ) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            match Self::scrcpy_drag(&session, x1, y1, x2, y2, duration_ms) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy swipe failed, falling back to adb"),
            }
        }

        exec_adb_shell(
            &self.config,
            &resolved,
            &format!("input swipe {x1} {y1} {x2} {y2} {duration_ms}"),
            self.config.adb_timeout,
        )?;
        Ok(())
    }

    pub fn long_press(&self, serial: Option<&str>, x: i32, y: i32, duration_ms: u32) -> RouterResult<()> {
        self.swipe(serial, x, y, x, y, duration_ms)
    }

    /// Unlike [`Router::swipe`], the ADB fallback here picks a distinct
    /// command depending on SDK level; the scrcpy path itself is never
    /// SDK-gated since the control socket doesn't care about the device's
    /// API level.
    pub fn drag_drop(
        &self,
        serial: Option<&str>,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u32,
    ) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            match Self::scrcpy_drag(&session, x1, y1, x2, y2, duration_ms) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy drag-drop failed, falling back to adb"),
            }
        }

        let command = if self.sdk_or_zero(&resolved) >= 26 {
            format!("input draganddrop {x1} {y1} {x2} {y2} {duration_ms}")
        } else {
            format!("input swipe {x1} {y1} {x2} {y2} {duration_ms}")
        };
        exec_adb_shell(&self.config, &resolved, &command, self.config.adb_timeout)?;
        Ok(())
    }

    pub fn scroll(&self, serial: Option<&str>, x: i32, y: i32, dx: i32, dy: i32) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            let (w, h) = (session.metadata.width as u16, session.metadata.height as u16);
            let result = session.send_control_message(&codec::inject_scroll(
                x,
                y,
                w,
                h,
                (dx * 16) as f32,
                (dy * 16) as f32,
                PRIMARY_BUTTON,
            ));
            match result {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy scroll failed, falling back to adb"),
            }
        }

        // No direct ADB equivalent to a scroll gesture; approximate with a
        // short swipe in the scroll direction.
        exec_adb_shell(
            &self.config,
            &resolved,
            &format!("input swipe {x} {y} {} {} 300", x + dx * 100, y + dy * 100),
            self.config.adb_timeout,
        )?;
        Ok(())
    }

    pub fn input_text(&self, serial: Option<&str>, text: &str) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            let message = codec::inject_text(text)?;
            match session.send_control_message(&message) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy input-text failed, falling back to adb"),
            }
        }

        exec_adb_shell(
            &self.config,
            &resolved,
            &format!("input text {}", escape_for_input_text(text)),
            self.config.adb_timeout,
        )?;
        Ok(())
    }

    pub fn key_event(&self, serial: Option<&str>, key_name: &str) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;
        let keycode = match lookup_keycode(key_name) {
            Some(keycode) => keycode,
            None => key_name
                .parse::<i32>()
                .map_err(|_| RouterError::UnknownKeyName(key_name.to_string()))?,
        };

        if let Some(session) = self.ready_session(&resolved) {
            let result = session
                .send_control_message(&codec::inject_keycode(key_action::DOWN, keycode, 0, 0))
                .and_then(|()| {
                    std::thread::sleep(KEY_EVENT_HOLD);
                    session.send_control_message(&codec::inject_keycode(key_action::UP, keycode, 0, 0))
                });
            match result {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy key-event failed, falling back to adb"),
            }
        }

        exec_adb_shell(
            &self.config,
            &resolved,
            &format!("input keyevent {keycode}"),
            self.config.adb_timeout,
        )?;
        Ok(())
    }

    pub fn clipboard_get(&self, serial: Option<&str>) -> RouterResult<String> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            match session.get_clipboard(dab_wire::constants::copy_key::COPY, self.config.clipboard_timeout) {
                Ok(text) => return Ok(text),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy clipboard-get failed, falling back to adb"),
            }
        }

        let command = if self.sdk_or_zero(&resolved) >= 31 {
            "cmd clipboard get"
        } else {
            "service call clipboard 2"
        };
        let output = exec_adb_shell(&self.config, &resolved, command, self.config.adb_timeout)?;
        Ok(parse_clipboard_dump(&output))
    }

    pub fn clipboard_set(&self, serial: Option<&str>, text: &str, paste: bool) -> RouterResult<()> {
        let resolved = self.resolve(serial)?;

        if let Some(session) = self.ready_session(&resolved) {
            let sequence = session.next_clipboard_sequence();
            let message = codec::set_clipboard(sequence, paste, text);
            match session.send_control_message(&message) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(error = %err, serial = %resolved, "scrcpy clipboard-set failed, falling back to adb"),
            }
        }

        let encoded = BASE64.encode(text);
        let command = if self.sdk_or_zero(&resolved) >= 29 {
            format!("echo {encoded} | base64 -d | cmd clipboard set")
        } else {
            format!("echo {encoded} | base64 -d | xargs -0 am broadcast -a clipper.set -e text")
        };
        exec_adb_shell(&self.config, &resolved, &command, self.config.adb_timeout)?;

        if paste {
            warn!(serial = %resolved, "clipboard-set fell back to adb; paste was not performed");
        }
        Ok(())
    }

    fn scrcpy_drag(
        session: &Session,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u32,
    ) -> Result<(), SessionError> {
        let (w, h) = (session.metadata.width as u16, session.metadata.height as u16);

        session.send_control_message(&codec::inject_touch(
            motion_action::DOWN,
            0,
            x1,
            y1,
            w,
            h,
            1.0,
            PRIMARY_BUTTON,
            PRIMARY_BUTTON,
        ))?;

        let steps = (duration_ms / 16).max(1);
        let step_delay = Duration::from_millis((duration_ms / steps) as u64);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let x = x1 + ((x2 - x1) as f32 * t) as i32;
            let y = y1 + ((y2 - y1) as f32 * t) as i32;
            session.send_control_message(&codec::inject_touch(
                motion_action::MOVE,
                0,
                x,
                y,
                w,
                h,
                1.0,
                PRIMARY_BUTTON,
                PRIMARY_BUTTON,
            ))?;
            std::thread::sleep(step_delay);
        }

        session.send_control_message(&codec::inject_touch(
            motion_action::UP,
            0,
            x2,
            y2,
            w,
            h,
            0.0,
            PRIMARY_BUTTON,
            PRIMARY_BUTTON,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{TcpListener, TcpStream};
    use std::sync::Arc;

    /// An `adb` stand-in that logs every invocation's argv (one line per
    /// call) to `log_path` and always exits 0 with no output. Used to
    /// verify which path (scrcpy vs. ADB shell) a router method actually
    /// took without a real device attached.
    fn write_logging_fake_adb(log_path: &std::path::Path) -> std::path::PathBuf {
        let script_path = std::env::temp_dir().join(format!("dab-router-fake-adb-{}.sh", std::process::id()));
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> {}\nexit 0\n",
            log_path.to_string_lossy()
        );
        std::fs::write(&script_path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&script_path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&script_path, perms).unwrap();
        }
        script_path
    }

    /// With no scrcpy server jar configured, every session start fails, so
    /// `tap` must fall back to an `adb shell input tap` call rather than
    /// erroring out.
    #[test]
    fn tap_falls_back_to_adb_shell_when_no_session_is_available() {
        let log_path = std::env::temp_dir().join(format!("dab-router-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log_path);
        let fake_adb = write_logging_fake_adb(&log_path);

        let mut config = BridgeConfig::default();
        config.adb_path = fake_adb.to_string_lossy().to_string();
        config.scrcpy_server_path = None;

        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        let router = Router::new(config, sessions);

        router.tap(Some("FAKESERIAL"), 540, 1200).expect("adb fallback should succeed");

        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        assert!(
            log.lines().any(|l| l.contains("input tap 540 1200")),
            "expected an `input tap` invocation, got: {log:?}"
        );
    }

    /// A session that is registered but whose transport has already died
    /// must still be fallen through to ADB, not just the "no session at
    /// all" case above.
    #[test]
    fn tap_falls_back_to_adb_shell_when_scrcpy_session_is_broken() {
        let log_path = std::env::temp_dir().join(format!("dab-router-broken-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log_path);
        let fake_adb = write_logging_fake_adb(&log_path);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let accept_thread = std::thread::spawn(move || listener.accept().unwrap().0);
        let client = TcpStream::connect(addr).unwrap();
        let _server_side = accept_thread.join().unwrap();

        let metadata = dab_session::DeviceMetadata {
            device_name: "broken".to_string(),
            codec_id: 0,
            width: 1080,
            height: 2400,
        };
        let session = dab_session::Session::spawn("FAKESERIAL".to_string(), 1, "3.3.4".to_string(), metadata, client)
            .expect("session should spawn around an already-connected socket");
        session.mark_transport_broken_for_test();

        let mut config = BridgeConfig::default();
        config.adb_path = fake_adb.to_string_lossy().to_string();

        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        sessions.insert_session_for_test("FAKESERIAL", session);

        let router = Router::new(config, sessions);
        router
            .tap(Some("FAKESERIAL"), 10, 20)
            .expect("a broken scrcpy transport must still fall back to adb");

        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        assert!(
            log.lines().any(|l| l.contains("input tap 10 20")),
            "expected an `input tap` invocation, got: {log:?}"
        );
    }

    #[test]
    fn drag_drop_uses_draganddrop_on_sdk_26_and_above() {
        let log_path = std::env::temp_dir().join(format!("dab-router-sdk26-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log_path);
        let script_path = std::env::temp_dir().join(format!("dab-router-sdk26-adb-{}.sh", std::process::id()));
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> {}\ncase \"$*\" in\n  *version.sdk*) echo 26 ;;\nesac\nexit 0\n",
            log_path.to_string_lossy()
        );
        std::fs::write(&script_path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&script_path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&script_path, perms).unwrap();
        }

        let mut config = BridgeConfig::default();
        config.adb_path = script_path.to_string_lossy().to_string();

        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        let router = Router::new(config, sessions);

        router
            .drag_drop(Some("FAKESERIAL"), 0, 0, 100, 100, 300)
            .expect("drag_drop must not be rejected for SDK reasons");

        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        assert!(
            log.lines().any(|l| l.contains("input draganddrop 0 0 100 100 300")),
            "expected an `input draganddrop` invocation, got: {log:?}"
        );
    }

    #[test]
    fn drag_drop_falls_back_to_swipe_below_sdk_26() {
        let log_path = std::env::temp_dir().join(format!("dab-router-sdk-old-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log_path);
        // getprop ro.build.version.sdk returns empty from this stand-in,
        // which parses to sdk 0 — well below the draganddrop floor.
        let fake_adb = write_logging_fake_adb(&log_path);

        let mut config = BridgeConfig::default();
        config.adb_path = fake_adb.to_string_lossy().to_string();

        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        let router = Router::new(config, sessions);

        router
            .drag_drop(Some("FAKESERIAL"), 0, 0, 100, 100, 300)
            .expect("drag_drop must not be rejected for SDK reasons");

        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        assert!(
            log.lines().any(|l| l.contains("input swipe 0 0 100 100 300")),
            "expected an `input swipe` invocation, got: {log:?}"
        );
    }

    #[test]
    fn scroll_falls_back_to_a_swipe_scaled_by_100_over_300ms() {
        let log_path = std::env::temp_dir().join(format!("dab-router-scroll-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log_path);
        let fake_adb = write_logging_fake_adb(&log_path);

        let mut config = BridgeConfig::default();
        config.adb_path = fake_adb.to_string_lossy().to_string();

        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        let router = Router::new(config, sessions);

        router.scroll(Some("FAKESERIAL"), 500, 500, 1, -2).expect("adb fallback should succeed");

        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        assert!(
            log.lines().any(|l| l.contains("input swipe 500 500 600 300 300")),
            "expected a scaled `input swipe` invocation, got: {log:?}"
        );
    }

    #[test]
    fn key_event_parses_unknown_names_as_decimal_keycodes() {
        let log_path = std::env::temp_dir().join(format!("dab-router-keyevent-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log_path);
        let fake_adb = write_logging_fake_adb(&log_path);

        let mut config = BridgeConfig::default();
        config.adb_path = fake_adb.to_string_lossy().to_string();

        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        let router = Router::new(config, sessions);

        router.key_event(Some("FAKESERIAL"), "231").expect("decimal key names should be accepted");

        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        assert!(log.lines().any(|l| l.contains("input keyevent 231")));
    }

    #[test]
    fn key_event_rejects_names_that_are_neither_known_nor_numeric() {
        let config = BridgeConfig::default();
        let sessions = Arc::new(dab_session::SessionManager::new(config.clone()));
        let router = Router::new(config, sessions);

        let result = router.key_event(Some("FAKESERIAL"), "NOT_A_KEY");
        assert!(matches!(result, Err(RouterError::UnknownKeyName(_))));
    }
}
