//! Single-request client: fetch one URL, then print or save the body.

pub mod disposition;
pub mod fetch;

pub use disposition::{Disposition, present};
pub use fetch::{FetchedResponse, get, request_url};
