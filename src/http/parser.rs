use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, utf8_percent_encode};

use crate::error::DecodeError;
use crate::http::headers::HeaderList;
use crate::http::request::{Method, RequestLine};

const DELIMITER: &[u8] = b"\r\n\r\n";

/// Everything but unreserved characters is escaped inside a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Like [`SEGMENT`] but keeps `/` so whole paths stay readable.
const PATH: &AsciiSet = &SEGMENT.remove(b'/');

/// A message split into its start line, header block and body.
#[derive(Debug, Clone)]
pub struct DecodedMessage {
    /// Status line for responses, request line for requests.
    pub start_line: String,
    pub headers: HeaderList,
    /// Raw body bytes, never decoded.
    pub body: Vec<u8>,
    /// `false` when no header/body delimiter was found and the whole buffer
    /// was read as headers.
    pub framed: bool,
}

/// Splits raw bytes into start line, headers and body.
///
/// A buffer without a blank line is still accepted: it is treated as headers
/// only, with an empty body and `framed == false`. Header text is read as
/// Latin-1, so arbitrary bytes never fail to decode.
pub fn decode(buf: &[u8]) -> Result<DecodedMessage, DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::Empty);
    }

    let (head, body, framed) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + DELIMITER.len()..], true),
        None => (buf, &[][..], false),
    };

    let text = latin1_to_string(head);
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let start_line = lines.next().unwrap_or_default().trim().to_string();
    if start_line.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut headers = HeaderList::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        headers.push_line(line);
    }

    Ok(DecodedMessage {
        start_line,
        headers,
        body: body.to_vec(),
        framed,
    })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(DELIMITER.len()).position(|w| w == DELIMITER)
}

/// Byte-preserving decode: every byte maps to the code point of equal value.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Inverse of [`latin1_to_string`]. Characters above U+00FF become `?`.
pub fn latin1_to_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// `HTTP/1.1 404 Not Found`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatusLine {
    pub version: String,
    pub code: u16,
    pub reason: String,
}

impl FromStr for HttpStatusLine {
    type Err = DecodeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || DecodeError::MalformedStatusLine(line.to_string());

        let mut parts = line.trim().splitn(3, ' ');
        let version = parts.next().filter(|v| v.starts_with("HTTP/")).ok_or_else(malformed)?;
        let code = parts
            .next()
            .and_then(|c| c.parse::<u16>().ok())
            .ok_or_else(malformed)?;
        let reason = parts.next().unwrap_or_default().trim();

        Ok(Self {
            version: version.to_string(),
            code,
            reason: reason.to_string(),
        })
    }
}

impl fmt::Display for HttpStatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version, self.code, self.reason)
    }
}

/// Parses `<method> <target> <version>`; anything other than exactly three
/// tokens is malformed.
pub fn parse_request_line(line: &str) -> Result<RequestLine, DecodeError> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version), None) => Ok(RequestLine {
            method: Method::parse(method),
            target: target.to_string(),
            version: version.to_string(),
        }),
        _ => Err(DecodeError::MalformedRequestLine(line.to_string())),
    }
}

/// Reduces a wire request target to a decoded filesystem-style path.
///
/// Query and fragment are dropped, then percent escapes are decoded. Invalid
/// UTF-8 after decoding is replaced rather than rejected.
pub fn decode_target(target: &str) -> String {
    let path = target
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let raw = latin1_to_bytes(path);
    percent_decode(&raw).decode_utf8_lossy().into_owned()
}

/// Percent-encodes a single path segment, `/` included.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encodes a decoded path for use in a link or `Location` header.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}
