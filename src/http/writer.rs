use chrono::{DateTime, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::HeaderList;
use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Formats a timestamp the way the `Date` header expects it.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Encodes a complete response stamped with the current time.
pub fn encode(
    status: StatusCode,
    content_type: &str,
    body: &[u8],
    extra: &HeaderList,
) -> Vec<u8> {
    encode_at(status, content_type, body, extra, Utc::now())
}

/// Encodes a complete response with an explicit `Date`.
///
/// Header order is fixed: `Date`, `Content-Type`, `Content-Length`,
/// `Connection: close`, then `extra` in order.
pub fn encode_at(
    status: StatusCode,
    content_type: &str,
    body: &[u8],
    extra: &HeaderList,
    date: DateTime<Utc>,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256 + body.len());

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    write_header(&mut buf, "Date", &http_date(date));
    write_header(&mut buf, "Content-Type", content_type);
    write_header(&mut buf, "Content-Length", &body.len().to_string());
    write_header(&mut buf, "Connection", "close");
    for (name, value) in extra.fields() {
        write_header(&mut buf, name, value);
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(body);

    buf
}

fn write_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    encode(resp.status, &resp.content_type, &resp.body, &resp.headers)
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
