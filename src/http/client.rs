//! HTTP/1.1 request/response exchange.
//!
//! One request per connection.  The caller learns success or failure
//! from the presence of a body: only a 200 response yields `Some`,
//! and a failed stream open yields `None` with no internal retry —
//! the duty loop naturally retries on its next iteration.

use log::{debug, warn};

use super::chunked;
use super::transport::{read_line, Connection, StreamPort};

/// Request methods the controller uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Response header map: case-insensitive names, last write wins.
#[derive(Debug, Default)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((name, value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP client bound to one remote endpoint.
pub struct HttpClient<'a, S: StreamPort> {
    transport: &'a mut S,
    host: &'a str,
    port: u16,
    api_key: &'a str,
    timeout_secs: u8,
}

impl<'a, S: StreamPort> HttpClient<'a, S> {
    pub fn new(
        transport: &'a mut S,
        host: &'a str,
        port: u16,
        api_key: &'a str,
        timeout_secs: u8,
    ) -> Self {
        Self {
            transport,
            host,
            port,
            api_key,
            timeout_secs,
        }
    }

    /// Perform one request.  `Some(body)` only for a 200 response.
    ///
    /// The connection is scoped to this call; dropping it on any return
    /// path releases the stream exactly once.
    pub fn request(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Option<&[u8]>,
    ) -> Option<Vec<u8>> {
        let mut conn = self
            .transport
            .open(self.host, self.port, self.timeout_secs)?;

        if self.send_request(&mut conn, method, uri, content_type, body).is_err() {
            warn!("request write failed, dropping connection");
            return None;
        }

        let status = read_status_line(&mut conn)?;
        let headers = read_headers(&mut conn);

        let chunked_body = headers
            .get("transfer-encoding")
            .is_some_and(|v| v.to_ascii_lowercase().contains("chunked"));

        if status != 200 {
            debug!("{} {} -> {}", method.as_str(), uri, status);
            return None;
        }

        let mut out = Vec::new();
        if chunked_body {
            chunked::read_chunked(&mut conn, &mut out);
        } else {
            chunked::read_to_end(&mut conn, &mut out);
        }
        Some(out)
    }

    fn send_request(
        &self,
        conn: &mut S::Conn,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Option<&[u8]>,
    ) -> Result<(), super::transport::TransportError> {
        let mut head = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nX-ApiKey: {}\r\nConnection: close\r\n",
            method.as_str(),
            uri,
            self.host,
            self.api_key,
        );
        if let Some(body) = body {
            if let Some(content_type) = content_type {
                head.push_str(&format!("Content-Type: {content_type}\r\n"));
            }
            head.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        head.push_str("\r\n");

        conn.write_all(head.as_bytes())?;
        if let Some(body) = body {
            conn.write_all(body)?;
        }
        conn.flush()
    }
}

/// Parse `HTTP/1.1 <status> <reason>`.  `None` on EOF or garbage.
fn read_status_line(conn: &mut impl Connection) -> Option<u16> {
    let mut line = Vec::new();
    if !read_line(conn, &mut line) {
        return None;
    }
    let text = core::str::from_utf8(&line).ok()?;
    let status = text.split_whitespace().nth(1)?;
    status.parse().ok()
}

/// Read headers up to the blank separator line.
fn read_headers(conn: &mut impl Connection) -> Headers {
    let mut headers = Headers::default();
    let mut line = Vec::new();
    while read_line(conn, &mut line) {
        if line.is_empty() {
            break;
        }
        if let Ok(text) = core::str::from_utf8(&line) {
            if let Some((name, value)) = text.split_once(':') {
                headers.insert(name.trim(), value.trim());
            }
        }
    }
    headers
}

// ── Tests ────────────────────────────────────────────────────
