//! JSON:API Stream - Cursors over serialized documents
//!
//! This crate provides the stream layer the converters work against:
//!
//! - [`TokenReader`]: pull cursor with path tracking and bounded input
//! - [`TokenWriter`]: push cursor that validates nesting and builds a value
//! - [`navigator`]: entering and leaving a named member, lazy array iteration

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod limited;
pub mod navigator;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use jsonapi_format::{JsonApiError, JsonPath, JsonToken, Limits, Result};
pub use navigator::{ArrayElements, ReadMarker, WriteMarker};
pub use reader::TokenReader;
pub use writer::TokenWriter;
