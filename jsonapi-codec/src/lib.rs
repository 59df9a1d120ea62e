//! JSON:API Codec - Resource-list conversion
//!
//! This crate provides the converters that move lists of resource objects
//! between native collections and JSON:API documents:
//!
//! - [`ResourceListConverter`]: reads and writes a list under `data`, either
//!   as relationship linkage or as document primary data
//! - [`ElementConverter`]: per-element contract, with
//!   [`IdentifierConverter`] and [`SerdeResourceConverter`] built in
//! - [`ListType`]: the native collections a list can be built into
//! - [`RootResolver`]: telling whole documents apart from nested lists
//! - [`WriteContext`]: attribute-vs-relationship classification
//!
//! The free functions at the crate root cover the common case of a
//! document whose primary data is a list of serde resource types.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod converter;
pub mod identifier;
pub mod list;
pub mod resource_list;
pub mod root;
pub mod serde_bridge;
pub mod shape;

// Re-export commonly used types
pub use context::{AttributeOrRelationshipProbe, Classification, NoContext, WriteContext};
pub use converter::ElementConverter;
pub use identifier::{IdentifierConverter, ResourceIdentifier};
pub use jsonapi_format::{JsonApiError, Limits, Result};
pub use jsonapi_stream::{TokenReader, TokenWriter};
pub use list::ListType;
pub use resource_list::ResourceListConverter;
pub use root::{DocumentRootResolver, NestedOnly, RootOutcome, RootResolver};
pub use serde_bridge::SerdeResourceConverter;
pub use shape::{Describe, ScalarKind, Shape};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

/// High-level codec options
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Security limits
    pub limits: Limits,
}

fn serde_list_converter<L>() -> ResourceListConverter<SerdeResourceConverter<L::Element>>
where
    L: ListType,
    L::Element: Serialize + DeserializeOwned + Describe,
{
    ResourceListConverter::new(SerdeResourceConverter::new())
}

/// Read the primary data of a document as a list
pub fn from_value<L>(document: Value, opts: &CodecOptions) -> Result<L>
where
    L: ListType,
    L::Element: Serialize + DeserializeOwned + Describe,
{
    let mut reader = TokenReader::from_value(document, opts.limits.clone())?;
    serde_list_converter::<L>().read(&mut reader)
}

/// Parse a document and read its primary data as a list
pub fn from_str<L>(input: &str, opts: &CodecOptions) -> Result<L>
where
    L: ListType,
    L::Element: Serialize + DeserializeOwned + Describe,
{
    let mut reader = TokenReader::from_str(input, opts.limits.clone())?;
    serde_list_converter::<L>().read(&mut reader)
}

/// Parse a document from a reader and read its primary data as a list
pub fn from_reader<L, R>(input: R, opts: &CodecOptions) -> Result<L>
where
    L: ListType,
    L::Element: Serialize + DeserializeOwned + Describe,
    R: Read,
{
    let mut reader = TokenReader::from_reader(input, opts.limits.clone())?;
    serde_list_converter::<L>().read(&mut reader)
}

/// Write a list as the primary data of a new document
///
/// `None` produces `{"data": []}`.
pub fn to_value<L>(list: Option<&L>, opts: &CodecOptions) -> Result<Value>
where
    L: ListType,
    L::Element: Serialize + DeserializeOwned + Describe,
{
    opts.limits.validate()?;
    let mut writer = TokenWriter::new(opts.limits.clone());
    serde_list_converter::<L>().write(&mut writer, list, &mut NoContext)?;
    writer.into_value()
}

/// Write a list as the primary data of a new document, serialized to text
pub fn to_string<L>(list: Option<&L>, opts: &CodecOptions) -> Result<String>
where
    L: ListType,
    L::Element: Serialize + DeserializeOwned + Describe,
{
    let value = to_value(list, opts)?;
    Ok(serde_json::to_string(&value)?)
}

/// Write `name: {"data": [...]}` into the object the writer has open
///
/// Returns how the probe classified the member, which for any list the
/// converter accepts is [`Classification::Relationship`].
pub fn write_relationship<C, R, L>(
    writer: &mut TokenWriter,
    name: &str,
    converter: &ResourceListConverter<C, R>,
    list: Option<&L>,
) -> Result<Classification>
where
    C: ElementConverter,
    R: RootResolver,
    L: ListType<Element = C::Element>,
{
    writer.write_property_name(name)?;
    let mut probe = AttributeOrRelationshipProbe::new();
    converter.write(writer, list, &mut probe)?;
    Ok(probe.property_type())
}
