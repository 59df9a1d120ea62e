//! JSON:API Format - Wire primitives for the resource-list codec
//!
//! This crate provides the pieces shared by the stream cursors and the
//! converters, with no conversion logic of its own:
//!
//! - Member names fixed by the document format
//! - Token model and value tokenization
//! - Cursor paths in JSON Pointer notation
//! - Error types
//! - Limits

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod limits;
pub mod path;
pub mod token;

// Re-export commonly used types
pub use error::{ElementSource, JsonApiError, Result};
pub use limits::Limits;
pub use path::{JsonPath, PathSegment};
pub use token::JsonToken;
