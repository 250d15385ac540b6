use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::http::parser::{decode, encode_path, parse_request_line};
use crate::http::request::{Method, RequestLine};
use crate::http::response::{
    MSG_NOT_FOUND, MSG_UNREADABLE, MSG_UNSUPPORTED_TYPE, Response, TEXT_HTML_UTF8,
};
use crate::http::writer::ResponseWriter;
use crate::server::Site;
use crate::server::listing::{generate_listing, read_entries};
use crate::server::resolver::{NotFound, TargetKind, redirect_location, resolve};

/// One accepted connection. Exactly one response is written (or none, for
/// an unparseable request line) and the stream is then closed.
pub struct Connection<'a, S> {
    stream: S,
    site: &'a Site,
    read_buffer_size: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(RequestLine),
    Writing(ResponseWriter),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: &'a Site, read_buffer_size: usize) -> Self {
        Self {
            stream,
            site,
            read_buffer_size,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(req) => ConnectionState::Processing(req),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = handle_request(self.site, req).await;
                    info!(
                        status = response.status.as_u16(),
                        method = %req.method,
                        target = %req.target,
                        "Responding"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // Peer may already be gone; the response is out either way.
                    let _ = self.stream.shutdown().await;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads once; whatever arrived is all the request there is.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<RequestLine>> {
        let mut buf = vec![0u8; self.read_buffer_size];
        let n = self.stream.read(&mut buf).await?;

        if n == 0 {
            // Client closed connection
            return Ok(None);
        }

        let parsed = decode(&buf[..n]).and_then(|msg| parse_request_line(&msg.start_line));
        match parsed {
            Ok(req) => Ok(Some(req)),
            Err(e) => {
                debug!(error = %e, "Dropping malformed request");
                Ok(None)
            }
        }
    }
}

/// Produces the single response for `req`.
pub async fn handle_request(site: &Site, req: &RequestLine) -> Response {
    if req.method != Method::GET {
        return Response::not_implemented();
    }

    let url_path = req.decoded_path();
    let target = resolve(&site.doc_root, &site.content_types, &url_path).await;

    match target.kind {
        TargetKind::Forbidden => {
            warn!(path = %url_path, "Directory traversal attempt");
            Response::forbidden()
        }

        TargetKind::Directory if !url_path.ends_with('/') => {
            Response::redirect(encode_path(&redirect_location(&url_path)))
        }

        TargetKind::Directory => match read_entries(&target.path).await {
            Ok(entries) => Response::ok(TEXT_HTML_UTF8, generate_listing(&url_path, &entries)),
            Err(e) => {
                warn!(path = %target.path.display(), error = %e, "Failed to list directory");
                Response::not_found(MSG_NOT_FOUND)
            }
        },

        TargetKind::File { content_type } => match tokio::fs::read(&target.path).await {
            Ok(body) => Response::ok(content_type, body),
            Err(e) => {
                warn!(path = %target.path.display(), error = %e, "Failed to read file");
                Response::not_found(MSG_UNREADABLE)
            }
        },

        TargetKind::Missing(NotFound::UnsupportedType) => Response::not_found(MSG_UNSUPPORTED_TYPE),
        TargetKind::Missing(NotFound::NoSuchPath) => Response::not_found(MSG_NOT_FOUND),
    }
}
