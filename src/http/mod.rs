//! HTTP client module with error classification.

mod client;
mod error;

pub use client::{HttpClient, USER_AGENT};
pub use error::{FetchError, classify_error};
