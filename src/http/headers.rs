/// A single line of a header block.
///
/// Lines without a colon are kept verbatim so nothing the peer sent is lost,
/// but they never match a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine {
    Field { name: String, value: String },
    Raw(String),
}

/// Ordered header list.
///
/// Duplicates are preserved in arrival order and lookup is case-insensitive
/// with the first match winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    lines: Vec<HeaderLine>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `name: value` field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.lines.push(HeaderLine::Field {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Parses one wire line, splitting on the first colon.
    pub fn push_line(&mut self, line: &str) {
        match line.split_once(':') {
            Some((name, value)) => self.push(name.trim(), value.trim()),
            None => self.lines.push(HeaderLine::Raw(line.to_string())),
        }
    }

    /// Returns the trimmed value of the first field named `name`, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// # use shelf::http::headers::HeaderList;
    /// let mut headers = HeaderList::new();
    /// headers.push("Content-Type", "image/png");
    /// assert_eq!(headers.get("content-type"), Some("image/png"));
    /// assert_eq!(headers.get("Location"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.trim())
    }

    /// Iterates over `(name, value)` fields in order, skipping raw lines.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            HeaderLine::Field { name, value } => Some((name.as_str(), value.as_str())),
            HeaderLine::Raw(_) => None,
        })
    }

    pub fn lines(&self) -> &[HeaderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
