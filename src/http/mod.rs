//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: `GET` only, one response per
//! connection, always `Connection: close`.
//!
//! # Architecture
//!
//! - **`headers`**: ordered, case-insensitive header list
//! - **`parser`**: splits raw bytes into start line, headers and body; request
//!   and status line parsing; percent-coding of paths
//! - **`writer`**: encodes responses and writes them to a stream
//! - **`request`**: methods, the request line, client request serialization
//! - **`response`**: status codes and the responses the server sends
//! - **`mime`**: the content-type allow-list
//! - **`connection`**: the per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Single read of the request
//!        └──────┬──────┘
//!               │ Request line parsed (else → Closed, no response)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve path, build response
//!        └──────┬───────────┘
//!               │ Redirect | Listing | File | Reject
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use shelf::http::connection::Connection;
//! use shelf::server::Site;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let site = Site::open("./public")?;
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, &site, 4096);
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
