//! Mock implementations for testing.
//!
//! Enables testing the search pipeline without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable chunked bodies

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
