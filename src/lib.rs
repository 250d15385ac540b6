//! Shelf - a minimal HTTP/1.1 document server and fetch client.
//!
//! Core library for the wire codec, path resolution, listings and the
//! client's response handling.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod server;
