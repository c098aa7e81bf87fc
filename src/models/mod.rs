//! Request-side data models.

pub mod request;
pub mod source;

pub use request::{SearchRequest, CATEGORY_ALL};
pub use source::Source;
