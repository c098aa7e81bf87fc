//! NDJSON payload deserialization structs
//!
//! Internal structs used to deserialize the JSON object on each line of the
//! bid search stream once its `type` field has been read.

use serde::Deserialize;

use crate::ndjson::events::ResultRecord;

/// `{"type": "log", "message": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LogPayload {
    pub message: String,
}

/// `{"type": "result", "data": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResultPayload {
    pub data: Vec<ResultRecord>,
}
