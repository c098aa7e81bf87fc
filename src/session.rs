//! Per-search session state.
//!
//! `SearchSessionState` is a reducer over [`StreamEvent`]s: it owns the
//! progress log and the final result set of exactly one search. It does no
//! I/O and reads no clock; rendering works from a [`SessionSnapshot`].

use crate::ndjson::{ResultRecord, StreamEvent};

/// Mutable state for one in-flight search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSessionState {
    logs: Vec<String>,
    results: Vec<ResultRecord>,
    is_complete: bool,
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub logs: Vec<String>,
    pub results: Vec<ResultRecord>,
    pub is_complete: bool,
}

impl SearchSessionState {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event in arrival order
    pub fn apply_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Log { message } => self.logs.push(message),
            StreamEvent::Result { records } => {
                if self.is_complete {
                    // The service is only expected to send one result set.
                    tracing::warn!(
                        "Received another result event ({} records replace {}); keeping the latest",
                        records.len(),
                        self.results.len()
                    );
                }
                self.results = records;
                self.is_complete = true;
            }
        }
    }

    /// Apply a sequence of events in order
    pub fn apply_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = StreamEvent>,
    {
        for event in events {
            self.apply_event(event);
        }
    }

    /// Current state, valid mid-stream
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            logs: self.logs.clone(),
            results: self.results.clone(),
            is_complete: self.is_complete,
        }
    }

    /// Consume the session into its final snapshot without copying
    pub fn into_snapshot(self) -> SessionSnapshot {
        SessionSnapshot {
            logs: self.logs,
            results: self.results,
            is_complete: self.is_complete,
        }
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// Whether a result event has been applied
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}
