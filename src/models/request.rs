//! Validated search request.

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::models::Source;

/// Category parameter the client always sends; the service fans out to
/// every category itself.
pub const CATEGORY_ALL: &str = "all";

/// A search the client is allowed to send.
///
/// Construction enforces non-empty free text and at least one source, so a
/// request that reaches the transport is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    free_text: String,
    sources: BTreeSet<Source>,
}

impl SearchRequest {
    /// Validate and build a request. Surrounding whitespace is trimmed.
    pub fn new<I>(free_text: impl Into<String>, sources: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Source>,
    {
        let free_text = free_text.into().trim().to_string();
        if free_text.is_empty() {
            return Err(ValidationError::EmptyFreeText);
        }

        let sources: BTreeSet<Source> = sources.into_iter().collect();
        if sources.is_empty() {
            return Err(ValidationError::NoSources);
        }

        Ok(Self { free_text, sources })
    }

    /// Request against every source.
    pub fn all_sources(free_text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(free_text, Source::ALL)
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.sources.iter().copied()
    }

    /// Comma-joined source ids, e.g. `gov,tokyo`
    pub fn sources_param(&self) -> String {
        self.sources
            .iter()
            .map(Source::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Query parameters in the order the service documents them
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("category", CATEGORY_ALL.to_string()),
            ("free_text", self.free_text.clone()),
            ("sources", self.sources_param()),
        ]
    }
}
