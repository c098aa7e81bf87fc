//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Streaming HTTP GET
//! - [`StreamEventParserTrait`] - Incremental chunk-to-event decoding
//! - [`Clock`] - Current time for expiry classification

pub mod clock;
pub mod http;
pub mod parser;

pub use clock::{Clock, FixedClock, SystemClock};
pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use parser::StreamEventParserTrait;
