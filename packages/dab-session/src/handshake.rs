//! Dummy-byte verification and dual-socket connect against the forwarded
//! scrcpy port. The server accepts video first, then control, on the same
//! port — both legs must be dummy-verified before anything else happens.
use std::io::Read;
use std::net::TcpStream;
use std::time::{Duration, Instant};

use crate::error::{SessionError, SessionResult};

const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Connect to `addr`, retrying until `budget` elapses, then block until a
/// single dummy byte arrives on the socket.
///
/// `adb forward` accepts the TCP connection before the device-side server
/// has necessarily started listening on the abstract socket, so the first
/// few connect attempts can legitimately fail or the stream can stall with
/// no bytes; both are treated as "not ready yet" and retried within budget.
pub fn connect_and_verify_dummy_byte(
    addr: &str,
    budget: Duration,
) -> SessionResult<TcpStream> {
    let deadline = Instant::now() + budget;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(SessionError::DummyByteMissing);
        }

        match try_connect_and_read_dummy_byte(addr, remaining) {
            Ok(stream) => return Ok(stream),
            Err(_) if Instant::now() < deadline => {
                std::thread::sleep(CONNECT_RETRY_DELAY.min(remaining));
            }
            Err(_) => return Err(SessionError::DummyByteMissing),
        }
    }
}

fn try_connect_and_read_dummy_byte(addr: &str, timeout: Duration) -> SessionResult<TcpStream> {
    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(timeout))?;

    let mut dummy = [0u8; 1];
    stream.read_exact(&mut dummy)?;

    Ok(stream)
}
