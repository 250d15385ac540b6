use crate::http::headers::HeaderList;

/// HTTP status codes the server produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use shelf::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 301,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML_UTF8: &str = "text/html; charset=utf-8";

pub const MSG_NOT_FOUND: &str = "The requested file or resource was not found.";
pub const MSG_UNSUPPORTED_TYPE: &str = "Unsupported file type or extension.";
pub const MSG_UNREADABLE: &str = "File could not be opened/read.";

/// A response ready to be encoded.
///
/// `Date`, `Content-Length` and `Connection` are not stored: the writer
/// always derives them at encode time. `headers` holds only the extras,
/// such as `Location`.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    pub headers: HeaderList,
    pub body: Vec<u8>,
}

/// Builder for constructing responses in a fluent style.
///
/// # Example
///
/// ```
/// # use shelf::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("image/png")
///     .body(vec![0x89, b'P', b'N', b'G'])
///     .build();
/// assert_eq!(response.content_type, "image/png");
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    headers: HeaderList,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Starts a `text/plain` response with an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            headers: HeaderList::new(),
            body: Vec::new(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Appends an extra header, emitted after the mandatory ones.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK carrying `body` as `content_type`.
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .body(body)
            .build()
    }

    /// 301 pointing at `location`, empty body.
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::MovedPermanently)
            .header("Location", location)
            .build()
    }

    pub fn forbidden() -> Self {
        ResponseBuilder::new(StatusCode::Forbidden)
            .body(&b"403 Forbidden: Directory traversal attempt."[..])
            .build()
    }

    /// 404 with a small HTML page explaining `msg`.
    pub fn not_found(msg: &str) -> Self {
        let html = format!(
            "<html><body><h1>404 Not Found</h1><p>{}</p></body></html>",
            msg
        );
        ResponseBuilder::new(StatusCode::NotFound)
            .content_type(TEXT_HTML_UTF8)
            .body(html)
            .build()
    }

    pub fn not_implemented() -> Self {
        ResponseBuilder::new(StatusCode::NotImplemented)
            .body(&b"501 Not Implemented"[..])
            .build()
    }
}
