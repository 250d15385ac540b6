//! Content-type allow-list.

use std::collections::HashMap;
use std::path::Path;

/// Maps a lowercase extension (with its leading dot) to a content type.
///
/// The table is built once and handed to whoever needs it; anything it does
/// not list is never served.
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    by_extension: HashMap<String, String>,
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        Self::new([
            (".html", "text/html"),
            (".png", "image/png"),
            (".pdf", "application/pdf"),
        ])
    }
}

impl ContentTypeTable {
    /// Builds a table from `(extension, content type)` pairs. Extensions are
    /// normalized to lowercase with a leading dot.
    pub fn new<I, E, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (E, T)>,
        E: AsRef<str>,
        T: Into<String>,
    {
        let by_extension = entries
            .into_iter()
            .map(|(ext, ty)| (normalize_extension(ext.as_ref()), ty.into()))
            .collect();
        Self { by_extension }
    }

    /// Content type for `path`, or `None` if its extension is not allowed.
    ///
    /// Only the name is inspected, never the file contents.
    ///
    /// # Example
    ///
    /// ```
    /// # use shelf::http::mime::ContentTypeTable;
    /// let table = ContentTypeTable::default();
    /// assert_eq!(table.classify("docs/Report.PDF"), Some("application/pdf"));
    /// assert_eq!(table.classify("notes.txt"), None);
    /// ```
    pub fn classify(&self, path: impl AsRef<Path>) -> Option<&str> {
        let ext = path.as_ref().extension()?.to_str()?;
        self.by_extension
            .get(&normalize_extension(ext))
            .map(String::as_str)
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    format!(".{}", ext)
}
