//! Common test utilities for integration tests.
//!
//! Canned NDJSON bodies and helpers for pointing a client at a wiremock
//! server.

#![allow(dead_code)]

use bidscope::client::SearchClient;
use bidscope::config::ClientConfig;
use chrono::{DateTime, TimeZone, Utc};

/// The three-line response from a typical search: two progress logs and one
/// result whose deadline is long past.
pub const SCENARIO_BODY: &str = concat!(
    "{\"type\":\"log\",\"message\":\"started\"}\n",
    "{\"type\":\"log\",\"message\":\"fetching gov source\"}\n",
    "{\"type\":\"result\",\"data\":[{\"id\":\"1\",\"title\":\"T\",\"organization\":\"O\",",
    "\"deadline\":\"2020-01-01\",\"category\":\"C\",\"source\":\"Gov Portal\",",
    "\"url\":\"http://x\"}]}\n",
);

/// A response that finishes with an empty result set.
pub const EMPTY_RESULT_BODY: &str = concat!(
    "{\"type\":\"log\",\"message\":\"no matching bids\"}\n",
    "{\"type\":\"result\",\"data\":[]}\n",
);

/// Creates a reqwest-backed client for a mock server URI.
pub fn client_for(uri: &str) -> SearchClient {
    SearchClient::from_config(ClientConfig::new().with_base_url(uri))
        .expect("client should build")
}

/// A fixed instant in 2025, after every deadline in the canned bodies.
pub fn now_2025() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}
