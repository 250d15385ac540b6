//! HTML directory listings.

use std::io;
use std::path::Path;

use crate::http::parser::{encode_path, encode_segment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ListingEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: false }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: true }
    }
}

/// Reads the entries of `dir`, following symlinks to decide what is a directory.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    Ok(entries)
}

/// Renders a listing of `entries` as seen under `url_path`.
///
/// Entries are sorted by byte order of their names. Every entry is listed,
/// dotfiles included. A `../` link comes first unless `url_path` is `/`.
pub fn generate_listing(url_path: &str, entries: &[ListingEntry]) -> Vec<u8> {
    let mut sorted: Vec<&ListingEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    let base = if url_path.ends_with('/') {
        url_path.to_string()
    } else {
        format!("{}/", url_path)
    };
    let title = escape_html(url_path);

    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>Directory listing for {title}</title>\n\
         <style>\n\
         body {{ font-family: monospace; }}\n\
         a {{ text-decoration: none; }}\n\
         pre {{ margin: 0; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>Directory listing for {title}</h1>\n\
         <hr>\n\
         <pre>\n"
    );

    if base != "/" {
        html.push_str(&format!(
            "<a href=\"{}\">../</a>\n",
            encode_path(&parent_of(&base))
        ));
    }

    for entry in sorted {
        let mut href = encode_path(&base);
        href.push_str(&encode_segment(&entry.name));
        let mut label = escape_html(&entry.name);
        if entry.is_dir {
            href.push('/');
            label.push('/');
        }
        html.push_str(&format!("<a href=\"{}\">{}</a>\n", href, label));
    }

    html.push_str("</pre>\n<hr>\n</body>\n</html>\n");
    html.into_bytes()
}

/// `/a/b/` -> `/a/`, `/a/` -> `/`.
fn parent_of(dir_path: &str) -> String {
    let trimmed = dir_path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => format!("{}/", parent),
        _ => "/".to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_paths() {
        assert_eq!(parent_of("/a/b/"), "/a/");
        assert_eq!(parent_of("/a/"), "/");
        assert_eq!(parent_of("/"), "/");
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape_html("<a&b>"), "&lt;a&amp;b&gt;");
    }
}
