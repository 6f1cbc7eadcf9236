//! Transport abstraction — any byte-oriented client stream.
//!
//! Concrete implementations:
//! - TCP socket (`adapters::net`, host and ESP-IDF std targets)
//! - serial-attached WiFi modem channel (on-target)
//!
//! The HTTP client is generic over `StreamPort`, so swapping the modem
//! for a plain socket requires zero changes to the protocol logic.
//!
//! Implementations must release the underlying stream when the
//! connection value is dropped.  That gives every exit path of the
//! client — early returns included — exactly one release.

use core::fmt;

/// Errors a transport write can produce.  Reads signal failure by
/// returning end-of-data instead; the protocol layer cannot distinguish
/// a closed peer from a finished body, and does not need to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The peer closed the stream or the write failed outright.
    WriteFailed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "stream write failed"),
        }
    }
}

/// Factory side: opens client connections to a remote endpoint.
pub trait StreamPort {
    type Conn: Connection;

    /// Open a stream to `host:port`.  Returns `None` on failure — the
    /// caller retries on its next duty cycle, never internally.
    fn open(&mut self, host: &str, port: u16, timeout_secs: u8) -> Option<Self::Conn>;
}

/// An open byte stream.  Dropped ⇒ closed.
pub trait Connection {
    /// Write all of `data`.
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Flush buffered output to the wire.
    fn flush(&mut self) -> Result<(), TransportError>;

    /// Read one byte.  `None` means end-of-data: the peer closed, the
    /// transport failed, or the body is complete.  Blocks until a byte
    /// arrives or the transport gives up — there is no client-side
    /// timeout beyond what the transport itself enforces.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Read a CRLF- (or bare-LF-) terminated line into `line`.
///
/// The terminator is consumed but not stored.  Returns `false` when
/// end-of-data arrives before any byte of a line.
pub fn read_line(conn: &mut impl Connection, line: &mut Vec<u8>) -> bool {
    line.clear();
    let mut any = false;
    while let Some(byte) = conn.read_byte() {
        any = true;
        match byte {
            b'\n' => break,
            b'\r' => {}
            other => line.push(other),
        }
    }
    any
}
