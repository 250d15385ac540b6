use std::fmt;

use crate::http::headers::HeaderList;
use crate::http::parser::decode_target;

/// HTTP request methods.
///
/// Only `GET` is served; every other method is answered with 501 Not
/// Implemented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    /// Any other token, kept verbatim for logging.
    Extension(String),
}

impl Method {
    /// Parses a method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use shelf::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Extension("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::Extension(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a request: `GET /docs/a.pdf HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Request target exactly as sent on the wire.
    pub target: String,
    pub version: String,
}

impl RequestLine {
    /// The target with query stripped and percent escapes decoded.
    pub fn decoded_path(&self) -> String {
        decode_target(&self.target)
    }
}

/// Serializes a body-less GET request.
///
/// `Host` and `Connection: close` are always sent; `extra` headers follow.
pub fn build_get_request(target: &str, host: &str, extra: &HeaderList) -> Vec<u8> {
    let target = if target.is_empty() { "/" } else { target };

    let mut buf = Vec::new();
    buf.extend_from_slice(format!("GET {} HTTP/1.1\r\n", target).as_bytes());
    buf.extend_from_slice(format!("Host: {}\r\n", host).as_bytes());
    buf.extend_from_slice(b"Connection: close\r\n");
    for (name, value) in extra.fields() {
        buf.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
    }
    buf.extend_from_slice(b"\r\n");
    buf
}
