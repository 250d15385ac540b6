//! What the client does with a response body.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

use crate::client::fetch::FetchedResponse;
use crate::error::ClientError;
use crate::http::headers::HeaderList;
use crate::http::parser::{HttpStatusLine, latin1_to_string};

const DEFAULT_CONTENT_TYPE: &str = "text/html";
const SAVED_TYPES: [&str; 2] = ["image/png", "application/pdf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Anything but 200: report the status and show the body as text.
    Report { code: u16, reason: String },
    /// HTML, printed. `assumed` when the server sent no `Content-Type`.
    Display { content_type: String, assumed: bool },
    /// An unrecognised type, printed as text all the same.
    DisplayUnknown { content_type: String },
    /// Binary payload written to the output directory.
    Save { content_type: String },
}

/// Chooses how to handle a response from its status and headers alone.
pub fn decide(status: &HttpStatusLine, headers: &HeaderList) -> Disposition {
    if status.code != 200 {
        return Disposition::Report {
            code: status.code,
            reason: status.reason.clone(),
        };
    }

    let (content_type, assumed) = match headers.get("Content-Type") {
        Some(ct) if !ct.is_empty() => (ct.to_string(), false),
        _ => (DEFAULT_CONTENT_TYPE.to_string(), true),
    };
    let lowered = content_type.to_ascii_lowercase();

    if lowered.contains("text/html") {
        Disposition::Display { content_type, assumed }
    } else if SAVED_TYPES.iter().any(|t| lowered.contains(t)) {
        Disposition::Save { content_type }
    } else {
        Disposition::DisplayUnknown { content_type }
    }
}

/// UTF-8 if the body is valid UTF-8, otherwise byte-preserving Latin-1.
pub fn body_text(body: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(body) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(latin1_to_string(body)),
    }
}

/// File name for a download: the URL's last path segment, `index.html` for
/// `/`, `downloaded_file` when the segment is empty or unusable.
pub fn target_file_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .unwrap_or_default();

    let unusable = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\']);

    if !unusable {
        segment
    } else if url.path() == "/" {
        "index.html".to_string()
    } else {
        "downloaded_file".to_string()
    }
}

/// Writes `body` unmodified into `dir`, creating the directory if needed.
pub async fn save_body(dir: &Path, url: &Url, body: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(target_file_name(url));
    tokio::fs::write(&path, body).await?;
    Ok(path)
}

/// Applies the disposition for `resp`: prints to `out` or saves under `dir`.
pub async fn present<W: Write>(
    resp: &FetchedResponse,
    url: &Url,
    dir: &Path,
    out: &mut W,
) -> Result<Disposition, ClientError> {
    let disposition = decide(&resp.status, &resp.headers);

    match &disposition {
        Disposition::Report { code, reason } => {
            writeln!(out, "Server responded with status code: {} {}", code, reason)?;
            if !resp.body.is_empty() {
                writeln!(out, "\n--- Response Body ---")?;
                writeln!(out, "{}", latin1_to_string(&resp.body))?;
            }
        }

        Disposition::Display { assumed, .. } => {
            if *assumed {
                tracing::warn!("Content-Type header missing, treating body as HTML");
            }
            writeln!(out, "\n--- HTML Response Body ---")?;
            writeln!(out, "{}", body_text(&resp.body))?;
        }

        Disposition::DisplayUnknown { content_type } => {
            tracing::warn!(%content_type, "Unknown Content-Type, printing body as text");
            writeln!(out, "\n--- Unknown Response Body ---")?;
            writeln!(out, "{}", body_text(&resp.body))?;
        }

        Disposition::Save { content_type } => {
            let path = save_body(dir, url, &resp.body).await?;
            tracing::info!(%content_type, path = %path.display(), "Saved file");
            writeln!(out, "Successfully saved file to: {}", path.display())?;
        }
    }

    Ok(disposition)
}
