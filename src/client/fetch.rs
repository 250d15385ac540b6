//! Single GET request over a fresh connection.

use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::error::Elapsed;
use tokio::time::timeout;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::headers::HeaderList;
use crate::http::parser::{HttpStatusLine, decode};
use crate::http::request::build_get_request;

/// A decoded response as received from the server.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: HttpStatusLine,
    pub headers: HeaderList,
    pub body: Vec<u8>,
    /// `false` if the peer closed before the header/body delimiter.
    pub framed: bool,
}

/// Builds the absolute URL for `path` on `host:port`, adding a leading `/`
/// when missing. Unsafe characters in the path get percent-encoded.
pub fn request_url(host: &str, port: u16, path: &str) -> Result<Url, ClientError> {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let raw = format!("http://{}:{}{}", host, port, path);
    Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// The request target to put on the wire for `url`.
pub fn request_target(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Sends one GET for `url` and reads until the server closes the connection.
///
/// Connecting, sending the request and every individual read are each
/// bounded by the configured timeout, so a download only fails when the peer
/// stalls, not when it is merely slow. There is no retry.
pub async fn get(url: &Url, cfg: &ClientConfig) -> Result<FetchedResponse, ClientError> {
    let authority = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(url.to_string()))?;
    let host = authority.trim_start_matches('[').trim_end_matches(']');
    let port = url.port_or_known_default().unwrap_or(80);
    let limit = Duration::from_secs(cfg.timeout_secs);

    let mut stream = timeout(limit, TcpStream::connect((host, port)))
        .await
        .map_err(|_| ClientError::Timeout(cfg.timeout_secs))?
        .map_err(ClientError::Connection)?;

    tracing::debug!(%url, "Connected");

    let request = build_get_request(
        &request_target(url),
        &format!("{}:{}", authority, port),
        &HeaderList::new(),
    );

    let raw = exchange(&mut stream, &request, cfg).await?;

    parse_response(&raw)
}

async fn exchange(
    stream: &mut TcpStream,
    request: &[u8],
    cfg: &ClientConfig,
) -> Result<Vec<u8>, ClientError> {
    let limit = Duration::from_secs(cfg.timeout_secs);
    let timed_out = |_: Elapsed| ClientError::Timeout(cfg.timeout_secs);

    timeout(limit, stream.write_all(request))
        .await
        .map_err(timed_out)?
        .map_err(ClientError::Connection)?;
    timeout(limit, stream.flush())
        .await
        .map_err(timed_out)?
        .map_err(ClientError::Connection)?;

    let mut buffer = BytesMut::with_capacity(cfg.read_chunk_size);
    loop {
        buffer.reserve(cfg.read_chunk_size);
        let n = timeout(limit, stream.read_buf(&mut buffer))
            .await
            .map_err(timed_out)?
            .map_err(ClientError::Connection)?;
        if n == 0 {
            break;
        }
    }

    Ok(buffer.to_vec())
}

/// Turns the complete byte stream of a response into a [`FetchedResponse`].
pub fn parse_response(raw: &[u8]) -> Result<FetchedResponse, ClientError> {
    if raw.is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    let msg = decode(raw)?;
    if !msg.framed {
        tracing::warn!("Response ended before the header/body delimiter; body is empty");
    }
    let status: HttpStatusLine = msg.start_line.parse()?;

    Ok(FetchedResponse {
        status,
        headers: msg.headers,
        body: msg.body,
        framed: msg.framed,
    })
}
