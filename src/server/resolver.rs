//! Maps decoded URL paths onto the document root.

use std::path::{Path, PathBuf};

use crate::http::mime::ContentTypeTable;

pub const INDEX_FILE: &str = "index.html";

/// Why a target resolved to nothing servable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    /// Nothing exists at the path.
    NoSuchPath,
    /// A regular file exists but its extension is not allowed.
    UnsupportedType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// A regular file with an allowed content type.
    File { content_type: String },
    Directory,
    Missing(NotFound),
    /// The path tried to leave the document root.
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// True if any `/`- or `\`-separated segment of `url_path` is `..`.
///
/// Must be applied to the percent-decoded path.
pub fn has_traversal(url_path: &str) -> bool {
    url_path.split(['/', '\\']).any(|segment| segment == "..")
}

/// Resolves an already-decoded URL path against `doc_root`.
///
/// A directory reached without a trailing slash still resolves to
/// [`TargetKind::Directory`]; answering it with a redirect is up to the caller.
pub async fn resolve(doc_root: &Path, table: &ContentTypeTable, url_path: &str) -> ResolvedTarget {
    if has_traversal(url_path) {
        return ResolvedTarget {
            path: doc_root.to_path_buf(),
            kind: TargetKind::Forbidden,
        };
    }

    let local = doc_root.join(url_path.trim_start_matches(['/', '\\']));

    if url_path.ends_with('/') {
        let index = local.join(INDEX_FILE);
        if is_file(&index).await {
            return classified(index, table);
        }
        let kind = if is_dir(&local).await {
            TargetKind::Directory
        } else {
            TargetKind::Missing(NotFound::NoSuchPath)
        };
        return ResolvedTarget { path: local, kind };
    }

    if is_dir(&local).await {
        return ResolvedTarget {
            path: local,
            kind: TargetKind::Directory,
        };
    }

    if is_file(&local).await {
        return classified(local, table);
    }

    ResolvedTarget {
        path: local,
        kind: TargetKind::Missing(NotFound::NoSuchPath),
    }
}

fn classified(path: PathBuf, table: &ContentTypeTable) -> ResolvedTarget {
    let kind = match table.classify(&path) {
        Some(content_type) => TargetKind::File {
            content_type: content_type.to_string(),
        },
        None => TargetKind::Missing(NotFound::UnsupportedType),
    };
    ResolvedTarget { path, kind }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// `Location` for a directory requested without its trailing slash.
pub fn redirect_location(url_path: &str) -> String {
    format!("{}/", url_path)
}
