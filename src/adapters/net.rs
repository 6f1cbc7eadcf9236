//! TCP stream adapter.
//!
//! Implements [`StreamPort`] over `std::net::TcpStream`, which works on
//! the host and on ESP-IDF's std layer alike.  The connect honours the
//! configured timeout; reads deliberately carry no extra deadline — the
//! protocol layer treats whatever the transport enforces as final
//! (a stalled peer stalls the duty cycle, never crashes it).

use std::io::{BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

use crate::http::transport::{Connection, StreamPort, TransportError};

/// [`StreamPort`] over plain TCP.
#[derive(Debug, Default)]
pub struct TcpTransport;

/// One open socket; closed when dropped.
pub struct TcpConnection {
    reader: BufReader<TcpStream>,
}

impl StreamPort for TcpTransport {
    type Conn = TcpConnection;

    fn open(&mut self, host: &str, port: u16, timeout_secs: u8) -> Option<TcpConnection> {
        let timeout = Duration::from_secs(u64::from(timeout_secs));
        let addr = (host, port).to_socket_addrs().ok()?.next()?;
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => Some(TcpConnection {
                reader: BufReader::new(stream),
            }),
            Err(e) => {
                debug!("connect to {host}:{port} failed: {e}");
                None
            }
        }
    }
}

impl Connection for TcpConnection {
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.reader
            .get_mut()
            .write_all(data)
            .map_err(|_| TransportError::WriteFailed)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.reader
            .get_mut()
            .flush()
            .map_err(|_| TransportError::WriteFailed)
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}
