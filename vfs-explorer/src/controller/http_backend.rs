//! ``src/controller/http_backend.rs``
//! ============================================================================
//! # `HttpListingBackend`: listing requests over plain HTTP/1.1
//!
//! Issues `GET /vfs?root=<path>` with `Connection: close` and reads the whole
//! response. Bodies may be delimited by `Content-Length`, by chunked transfer
//! encoding, or by the server closing the connection.

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::ServerConfig;
use crate::controller::backend::{ListingBackend, interpret_response};
use crate::error::ListingError;
use crate::model::listing::Listing;

const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct HttpListingBackend {
    host: String,
    port: u16,
    endpoint: String,
}

#[derive(Debug)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

impl HttpListingBackend {
    pub fn new(host: impl Into<String>, port: u16, endpoint: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.host.clone(), config.port, config.endpoint.clone())
    }

    /// Request target for a listing of `root`. Separators stay literal, so
    /// `/home` becomes `/vfs?root=/home`.
    #[must_use]
    pub fn request_target(&self, root: Option<&str>) -> String {
        match root {
            Some(root) => format!("{}?root={}", self.endpoint, percent_encode(root)),
            None => self.endpoint.clone(),
        }
    }

    async fn get(&self, target: &str) -> Result<HttpResponse, String> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|error| format!("connect to {}:{} failed: {error}", self.host, self.port))?;

        let request = format!(
            "GET {target} HTTP/1.1\r\nHost: {}:{}\r\nAccept: application/json\r\nUser-Agent: vfs-explorer/{}\r\nConnection: close\r\n\r\n",
            self.host,
            self.port,
            env!("CARGO_PKG_VERSION"),
        );
        stream
            .write_all(request.as_bytes())
            .await
            .map_err(|error| format!("write request failed: {error}"))?;

        let mut buffer = Vec::new();
        let mut temp = [0u8; 8192];
        loop {
            let read = stream
                .read(&mut temp)
                .await
                .map_err(|error| format!("read failed: {error}"))?;
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&temp[..read]);
            if buffer.len() > MAX_RESPONSE_BYTES {
                return Err("response too large".to_string());
            }
            if response_complete(&buffer) {
                break;
            }
        }

        parse_response(&buffer)
    }
}

#[async_trait]
impl ListingBackend for HttpListingBackend {
    async fn fetch(&self, root: Option<&str>) -> Result<Listing, ListingError> {
        let target = self.request_target(root);
        debug!(request_target = %target, "Sending listing request");

        let response = self.get(&target).await.map_err(ListingError::Transport)?;
        debug!(status = response.status, bytes = response.body.len(), "Listing response received");

        interpret_response(response.status, &response.body)
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'/')
}

fn percent_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for &byte in raw.as_bytes() {
        if is_unreserved(byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    let needle = b"\r\n\r\n";
    buffer
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|index| index + needle.len())
}

fn header_value<'a>(headers: &'a str, wanted: &str) -> Option<&'a str> {
    headers.lines().skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case(wanted)
            .then(|| value.trim())
    })
}

/// True once a delimited body has fully arrived. Bodies without
/// `Content-Length` or chunked framing end only when the server closes.
fn response_complete(buffer: &[u8]) -> bool {
    let Some(header_end) = find_header_end(buffer) else {
        return false;
    };
    let Ok(header_text) = std::str::from_utf8(&buffer[..header_end]) else {
        return false;
    };
    let body = &buffer[header_end..];

    let chunked = header_value(header_text, "transfer-encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));
    if chunked {
        return decode_chunked(body).is_ok();
    }

    header_value(header_text, "content-length")
        .and_then(|length| length.parse::<usize>().ok())
        .is_some_and(|length| body.len() >= length)
}

fn parse_response(buffer: &[u8]) -> Result<HttpResponse, String> {
    let header_end =
        find_header_end(buffer).ok_or_else(|| "connection closed before response headers".to_string())?;
    let header_text = std::str::from_utf8(&buffer[..header_end])
        .map_err(|_| "response headers are not valid UTF-8".to_string())?;

    let status_line = header_text
        .lines()
        .next()
        .ok_or_else(|| "missing status line".to_string())?;
    let mut parts = status_line.split_whitespace();
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(format!("unexpected status line: {status_line}"));
    }
    let status = parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| format!("invalid status code in: {status_line}"))?;

    let raw_body = &buffer[header_end..];
    let chunked = header_value(header_text, "transfer-encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));

    let body = if chunked {
        decode_chunked(raw_body)?
    } else if let Some(length) = header_value(header_text, "content-length") {
        let length = length
            .parse::<usize>()
            .map_err(|_| "invalid content-length".to_string())?;
        if raw_body.len() < length {
            return Err("connection closed while reading response body".to_string());
        }
        raw_body[..length].to_vec()
    } else {
        raw_body.to_vec()
    };

    Ok(HttpResponse { status, body })
}

fn decode_chunked(mut raw: &[u8]) -> Result<Vec<u8>, String> {
    let mut body = Vec::with_capacity(raw.len());
    loop {
        let line_end = raw
            .windows(2)
            .position(|window| window == b"\r\n")
            .ok_or_else(|| "truncated chunk size".to_string())?;
        let size_line = std::str::from_utf8(&raw[..line_end])
            .map_err(|_| "chunk size is not valid UTF-8".to_string())?;
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| format!("invalid chunk size: {size_hex}"))?;
        raw = &raw[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        if size.checked_add(2).is_none_or(|needed| needed > raw.len()) {
            return Err("truncated chunk".to_string());
        }
        body.extend_from_slice(&raw[..size]);
        raw = &raw[size + 2..];
    }
}
