//! A single established scrcpy control session for one device.
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::sync::Mutex;
use std::time::Duration;

use dab_wire::constants::device_msg;
use dab_wire::device_message::{decode_clipboard_payload, validate_clipboard_payload_len};

use crate::error::{SessionError, SessionResult};
use crate::metadata::DeviceMetadata;

/// An open scrcpy session: one control socket, one reader thread
/// demultiplexing device-to-host messages into clipboard waiters.
pub struct Session {
    pub serial: String,
    pub scid: u32,
    pub server_version: String,
    pub metadata: DeviceMetadata,
    control_write: Mutex<TcpStream>,
    clipboard_seq: AtomicU64,
    clipboard_waiters: Mutex<VecDeque<SyncSender<String>>>,
    alive: AtomicBool,
}

impl Session {
    /// Spin up a session around an already dummy-verified, already
    /// metadata-consumed control socket, and start its reader thread.
    pub fn spawn(
        serial: String,
        scid: u32,
        server_version: String,
        metadata: DeviceMetadata,
        control: TcpStream,
    ) -> SessionResult<std::sync::Arc<Session>> {
        let reader_half = control.try_clone()?;

        let session = std::sync::Arc::new(Session {
            serial,
            scid,
            server_version,
            metadata,
            control_write: Mutex::new(control),
            clipboard_seq: AtomicU64::new(1),
            clipboard_waiters: Mutex::new(VecDeque::new()),
            alive: AtomicBool::new(true),
        });

        let reader_session = session.clone();
        std::thread::spawn(move || reader_session.reader_loop(reader_half));

        Ok(session)
    }

    /// Serialize a write of an already-encoded control message.
    pub fn send_control_message(&self, bytes: &[u8]) -> SessionResult<()> {
        if !self.alive.load(Ordering::Acquire) {
            return Err(SessionError::TransportBroken);
        }
        let mut guard = self.control_write.lock().unwrap();
        guard.write_all(bytes)?;
        Ok(())
    }

    /// Send a get-clipboard request and block (with `timeout`) for the
    /// device's reply, consumed in FIFO order against other concurrent
    /// clipboard-get callers on this session.
    pub fn get_clipboard(&self, copy_key: u8, timeout: Duration) -> SessionResult<String> {
        let (tx, rx) = mpsc::sync_channel(1);
        self.clipboard_waiters.lock().unwrap().push_back(tx);

        self.send_control_message(&dab_wire::codec::get_clipboard(copy_key))?;

        rx.recv_timeout(timeout)
            .map_err(|_| SessionError::ClipboardTimeout)
    }

    /// The next 64-bit clipboard-set sequence number for this session.
    pub fn next_clipboard_sequence(&self) -> u64 {
        self.clipboard_seq.fetch_add(1, Ordering::Relaxed)
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the transport dead without touching the socket. Exists only so
    /// other crates' tests can exercise the "session looked ready but the
    /// transport had already failed" fallback path deterministically.
    #[cfg(feature = "test-support")]
    pub fn mark_transport_broken_for_test(&self) {
        self.alive.store(false, Ordering::Release);
    }

    fn reader_loop(&self, mut read_half: TcpStream) {
        loop {
            let mut msg_type = [0u8; 1];
            if read_half.read_exact(&mut msg_type).is_err() {
                break;
            }

            if msg_type[0] != device_msg::CLIPBOARD {
                // Unknown device-to-host message types are drained and
                // ignored; only clipboard replies exist in this protocol
                // version.
                continue;
            }

            let mut len_bytes = [0u8; 4];
            if read_half.read_exact(&mut len_bytes).is_err() {
                break;
            }
            let len = u32::from_be_bytes(len_bytes);
            if validate_clipboard_payload_len(len).is_err() {
                break;
            }

            let mut payload = vec![0u8; len as usize];
            if read_half.read_exact(&mut payload).is_err() {
                break;
            }

            let text = decode_clipboard_payload(&payload);
            if let Some(waiter) = self.clipboard_waiters.lock().unwrap().pop_front() {
                let _ = waiter.send(text);
            }
        }

        self.alive.store(false, Ordering::Release);
        let mut waiters = self.clipboard_waiters.lock().unwrap();
        while let Some(waiter) = waiters.pop_front() {
            drop(waiter);
        }
    }
}
