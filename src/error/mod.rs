//! Error handling for bidscope.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Validation Errors**: Input rejected before a request is made
//! - **Search Errors**: Failures that end a search
//!
//! Per-line stream problems are not part of this hierarchy: the NDJSON
//! parser logs and drops them (see `crate::ndjson::NdjsonParseError`).
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped stream | Yes |
//! | Server | Service error status | 5xx only |
//! | User | Empty text or no sources | No |
//! | Configuration | Unusable service URL | No |

mod category;
mod search_error;

pub use category::ErrorCategory;
pub use search_error::{SearchError, ValidationError};

/// Type alias for Results using SearchError.
pub type BidscopeResult<T> = Result<T, SearchError>;
