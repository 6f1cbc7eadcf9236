//! Minimal HTTP/1.1 client over a byte-stream transport.
//!
//! The remote service sits behind a serial-attached WiFi modem acting
//! as a TCP client, so everything here is written against the
//! [`transport::StreamPort`] boundary rather than a socket API.  The
//! client supports exactly what the controller needs: one request per
//! connection (`Connection: close`), fixed-length and chunked response
//! bodies, and a present/absent result instead of surfaced status codes.

pub mod chunked;
pub mod client;
pub mod transport;

pub use client::{HttpClient, Method};
pub use transport::{Connection, StreamPort, TransportError};
