//! bidscope - streaming client for a public bid search service
//!
//! Sends a free-text query to the search service and consumes its NDJSON
//! response: progress logs are surfaced as they arrive and the final result
//! set is rendered with a per-row expiry flag.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod expiry;
pub mod models;
pub mod ndjson;
pub mod render;
pub mod session;
pub mod traits;
