//! HTTP networking module
//!
//! Provides the HTTP client and request types used to talk to the movie
//! metadata API, including the query-string escaping rule.

mod client;
mod request;

pub use client::{accept_json, HttpClient};
pub use request::{escape, ApiRequest, ApiResponse};
