//! Response body readers: fixed-length-to-EOF and chunked transfer.
//!
//! Chunked framing: each segment is a hexadecimal size line followed by
//! that many payload bytes; a zero-size segment terminates the body.
//! Blank lines between segments (the CRLF that trails each chunk) are
//! skipped when hunting for the next size line.
//!
//! Both readers grow the output buffer in fixed steps through
//! `try_reserve`, so an allocation failure mid-read stops the loop
//! early and hands the caller a truncated body instead of aborting the
//! duty cycle.

use log::{debug, warn};

use super::transport::{read_line, Connection};

/// Buffer growth step while a body streams in.
pub const BODY_GROWTH_STEP: usize = 256;

/// Append one byte, growing `out` by [`BODY_GROWTH_STEP`] as needed.
/// Returns `false` when the allocator refuses more memory.
fn push_body_byte(out: &mut Vec<u8>, byte: u8) -> bool {
    if out.len() == out.capacity() && out.try_reserve(BODY_GROWTH_STEP).is_err() {
        warn!("body buffer growth failed at {} bytes, truncating", out.len());
        return false;
    }
    out.push(byte);
    true
}

/// Read a non-chunked body: consume bytes until end-of-data.
pub fn read_to_end(conn: &mut impl Connection, out: &mut Vec<u8>) {
    while let Some(byte) = conn.read_byte() {
        if !push_body_byte(out, byte) {
            return;
        }
    }
}

/// Decode a chunked body into `out`.
///
/// A stream that ends before the terminal zero-size chunk decodes only
/// what arrived; the caller tolerates partial data.
pub fn read_chunked(conn: &mut impl Connection, out: &mut Vec<u8>) {
    let mut line = Vec::new();

    loop {
        // Hunt for the next size line, skipping blank continuation lines.
        if !read_line(conn, &mut line) {
            return;
        }
        if line.is_empty() {
            continue;
        }

        let text = core::str::from_utf8(&line).unwrap_or("");
        let Ok(size) = usize::from_str_radix(text.trim(), 16) else {
            debug!("bad chunk size line, stopping body read");
            return;
        };

        if size == 0 {
            // Terminal chunk: consume the trailing line and stop.
            let _ = read_line(conn, &mut line);
            return;
        }

        let mut remaining = size;
        while remaining > 0 {
            let Some(byte) = conn.read_byte() else {
                return; // EOF mid-chunk: truncated body.
            };
            if !push_body_byte(out, byte) {
                return;
            }
            remaining -= 1;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::TransportError;

    struct SliceConn {
        data: Vec<u8>,
        pos: usize,
    }

    impl SliceConn {
        fn new(parts: &[&str]) -> Self {
            Self {
                data: parts.concat().into_bytes(),
                pos: 0,
            }
        }
    }

    impl Connection for SliceConn {
        fn write_all(&mut self, _data: &[u8]) -> Result<(), TransportError> {
            Ok(())
        }
        fn flush(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
        fn read_byte(&mut self) -> Option<u8> {
            let byte = *self.data.get(self.pos)?;
            self.pos += 1;
            Some(byte)
        }
    }

    #[test]
    fn decodes_single_chunk() {
        let mut conn = SliceConn::new(&["4\r\n", "data\r\n", "0\r\n", "\r\n"]);
        let mut out = Vec::new();
        read_chunked(&mut conn, &mut out);
        assert_eq!(out, b"data");
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn decodes_multiple_chunks_with_hex_sizes() {
        let mut conn = SliceConn::new(&["a\r\n", "0123456789\r\n", "3\r\n", "abc\r\n", "0\r\n", "\r\n"]);
        let mut out = Vec::new();
        read_chunked(&mut conn, &mut out);
        assert_eq!(out, b"0123456789abc");
    }

    #[test]
    fn missing_terminal_chunk_decodes_until_eof() {
        let mut conn = SliceConn::new(&["4\r\n", "data\r\n", "5\r\n", "tru"]);
        let mut out = Vec::new();
        read_chunked(&mut conn, &mut out);
        assert_eq!(out, b"datatru");
    }

    #[test]
    fn blank_continuation_lines_skipped() {
        let mut conn = SliceConn::new(&["\r\n", "\r\n", "2\r\n", "ok\r\n", "0\r\n", "\r\n"]);
        let mut out = Vec::new();
        read_chunked(&mut conn, &mut out);
        assert_eq!(out, b"ok");
    }

    #[test]
    fn read_to_end_consumes_everything() {
        let mut conn = SliceConn::new(&["raw body bytes"]);
        let mut out = Vec::new();
        read_to_end(&mut conn, &mut out);
        assert_eq!(out, b"raw body bytes");
    }

    #[test]
    fn garbage_size_line_stops_cleanly() {
        let mut conn = SliceConn::new(&["nothex\r\n", "data"]);
        let mut out = Vec::new();
        read_chunked(&mut conn, &mut out);
        assert!(out.is_empty());
    }
}
