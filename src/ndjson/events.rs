//! NDJSON event types and definitions
//!
//! Contains the StreamEvent enum with the event variants emitted by the
//! bid search service, and the ResultRecord rows carried by the terminal event.

use serde::{Deserialize, Serialize};

/// A single bid returned by the search service.
///
/// String fields the backend omits default to empty so one sparse record
/// does not discard the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Backend-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    /// Submission deadline, usually `YYYY-MM-DD` or RFC 3339
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Display label of the portal the bid came from (e.g. "Gov Portal")
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
}

impl ResultRecord {
    /// Returns the deadline if present and not blank.
    pub fn deadline(&self) -> Option<&str> {
        self.deadline
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Typed events from the bid search stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Progress message, non-terminal
    Log { message: String },
    /// Final result set; a later one replaces an earlier one
    Result {
        #[serde(rename = "data")]
        records: Vec<ResultRecord>,
    },
}

impl StreamEvent {
    /// Returns the event type name as a string for debugging purposes.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::Log { .. } => "log",
            StreamEvent::Result { .. } => "result",
        }
    }

    /// Whether this event ends the search from the client's point of view.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Result { .. })
    }
}

/// Errors that can occur while parsing a single NDJSON line
#[derive(Debug, Clone, PartialEq)]
pub enum NdjsonParseError {
    /// Line is not a JSON object
    InvalidJson { source: String },
    /// Object has no string `type` field
    MissingType,
    /// `type` names an event this client does not know
    UnknownEventType(String),
    /// Known event type but the payload does not match
    InvalidPayload { event_type: String, source: String },
}

impl std::fmt::Display for NdjsonParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdjsonParseError::InvalidJson { source } => write!(f, "Invalid JSON line: {}", source),
            NdjsonParseError::MissingType => write!(f, "Missing event type field"),
            NdjsonParseError::UnknownEventType(t) => write!(f, "Unknown event type: {}", t),
            NdjsonParseError::InvalidPayload { event_type, source } => {
                write!(f, "Invalid payload for event '{}': {}", event_type, source)
            }
        }
    }
}

impl std::error::Error for NdjsonParseError {}
