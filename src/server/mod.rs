//! Document server: path resolution, listings and the accept loop.

pub mod listener;
pub mod listing;
pub mod resolver;

use std::path::PathBuf;

use anyhow::Context;

use crate::http::mime::ContentTypeTable;

/// What the server serves: a document root and the types it may hand out.
#[derive(Debug, Clone)]
pub struct Site {
    pub doc_root: PathBuf,
    pub content_types: ContentTypeTable,
}

impl Site {
    /// Opens `doc_root` with the default content-type table.
    ///
    /// Fails if the path does not name an existing directory.
    pub fn open(doc_root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let doc_root = doc_root.into();
        let meta = std::fs::metadata(&doc_root)
            .with_context(|| format!("Directory '{}' does not exist", doc_root.display()))?;
        if !meta.is_dir() {
            anyhow::bail!("'{}' is not a directory", doc_root.display());
        }

        Ok(Self {
            doc_root,
            content_types: ContentTypeTable::default(),
        })
    }
}
