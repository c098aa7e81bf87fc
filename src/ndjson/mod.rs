//! NDJSON (newline-delimited JSON) stream parser
//!
//! Parses the streamed response body of the bid search service.
//! Each line is one JSON object dispatched on its `type` field:
//! - `{"type": "log", "message": ...}` - progress message
//! - `{"type": "result", "data": [...]}` - final result set
//! - anything else - logged and dropped
//!
//! # Module structure
//! - `events` - Event type definitions (StreamEvent, ResultRecord, NdjsonParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `decoder` - Resumable UTF-8 decoding across chunk boundaries
//! - `parser` - Parsing logic (StreamEventParser, parse_line)

mod decoder;
mod events;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::Utf8Decoder;
pub use events::{NdjsonParseError, ResultRecord, StreamEvent};
pub use parser::{parse_line, StreamEventParser};
