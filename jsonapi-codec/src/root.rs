//! Document-root resolution
//!
//! A list converter is invoked both for relationship members nested inside a
//! resource object and for the primary data of a whole document. The two are
//! told apart once, before any list logic runs.

use crate::context::WriteContext;
use crate::converter::ElementConverter;
use crate::list::ListType;
use jsonapi_format::constants::DATA;
use jsonapi_format::{JsonApiError, JsonToken, Result};
use jsonapi_stream::navigator::iterate_array;
use jsonapi_stream::{TokenReader, TokenWriter};
use tracing::debug;

/// Outcome of asking whether a conversion targets the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootOutcome<T> {
    /// The resolver handled the whole document; this is its result
    Root(T),
    /// The value is a nested collection; the caller continues
    Nested,
}

/// Decides whether a list conversion is really a whole-document conversion
pub trait RootResolver: Send + Sync {
    /// Read the list as the primary data of a document, if the cursor is at the root
    fn try_read_root<L, C>(&self, reader: &mut TokenReader, elements: &C) -> Result<RootOutcome<L>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>;

    /// Write the list as the primary data of a document, if the writer is at the root
    fn try_write_root<L, C>(
        &self,
        writer: &mut TokenWriter,
        value: Option<&L>,
        elements: &C,
        ctx: &mut dyn WriteContext,
    ) -> Result<RootOutcome<()>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>;
}

impl<R: RootResolver + ?Sized> RootResolver for &R {
    fn try_read_root<L, C>(&self, reader: &mut TokenReader, elements: &C) -> Result<RootOutcome<L>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        (**self).try_read_root(reader, elements)
    }

    fn try_write_root<L, C>(
        &self,
        writer: &mut TokenWriter,
        value: Option<&L>,
        elements: &C,
        ctx: &mut dyn WriteContext,
    ) -> Result<RootOutcome<()>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        (**self).try_write_root(writer, value, elements, ctx)
    }
}

/// Resolver that treats an untouched cursor as the document root
///
/// The decision rests on cursor position alone: a list target never
/// describes a whole document, so a reader that has consumed nothing (or a
/// writer that has written nothing) is at the root. Reading parses the
/// top-level object, takes the list from `data` and skips every other
/// top-level member. Writing emits `{"data": [...]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRootResolver;

impl RootResolver for DocumentRootResolver {
    fn try_read_root<L, C>(&self, reader: &mut TokenReader, elements: &C) -> Result<RootOutcome<L>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        if reader.position() != 0 {
            return Ok(RootOutcome::Nested);
        }

        reader.expect(JsonToken::StartObject)?;
        let mut list = None;
        let mut skipped = Vec::new();
        loop {
            match reader.next_token()? {
                JsonToken::PropertyName(name) if name == DATA && list.is_none() => {
                    let items = iterate_array(reader, |r| elements.read(r))?;
                    list = Some(L::build(items)?);
                }
                JsonToken::PropertyName(name) => {
                    reader.skip_value()?;
                    skipped.push(name);
                }
                JsonToken::EndObject => break,
                other => {
                    return Err(JsonApiError::malformed(
                        reader.path().to_string(),
                        format!("expected property name, found {}", other.kind()),
                    ))
                }
            }
        }

        let list = list.ok_or_else(|| {
            JsonApiError::malformed("/", "document has no top-level 'data' member")
        })?;
        debug!(skipped = ?skipped, "read list as document primary data");
        Ok(RootOutcome::Root(list))
    }

    fn try_write_root<L, C>(
        &self,
        writer: &mut TokenWriter,
        value: Option<&L>,
        elements: &C,
        ctx: &mut dyn WriteContext,
    ) -> Result<RootOutcome<()>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        if writer.position() != 0 {
            return Ok(RootOutcome::Nested);
        }

        writer.write_start_object()?;
        writer.write_property_name(DATA)?;
        writer.write_start_array()?;
        let mut count = 0usize;
        for item in value.into_iter().flat_map(|list| list.elements()) {
            elements.write(writer, item, ctx)?;
            count += 1;
        }
        writer.write_end_array()?;
        writer.write_end_object()?;

        debug!(count, "wrote list as document primary data");
        Ok(RootOutcome::Root(()))
    }
}

/// Resolver for hosts that never place lists at the document root
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedOnly;

impl RootResolver for NestedOnly {
    fn try_read_root<L, C>(&self, _reader: &mut TokenReader, _elements: &C) -> Result<RootOutcome<L>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        Ok(RootOutcome::Nested)
    }

    fn try_write_root<L, C>(
        &self,
        _writer: &mut TokenWriter,
        _value: Option<&L>,
        _elements: &C,
        _ctx: &mut dyn WriteContext,
    ) -> Result<RootOutcome<()>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        Ok(RootOutcome::Nested)
    }
}
