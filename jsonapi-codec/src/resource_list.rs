//! Resource-list conversion under the `data` member
//!
//! Relationship linkage and document primary data both nest a list of
//! resource objects as `{"data": [...]}`. [`ResourceListConverter`] reads and
//! writes that nesting around a per-element converter:
//!
//! ```text
//! read:  root? -> enter "data" -> pull elements lazily -> build list -> exit
//! write: root? -> enter "data" -> write elements       -> exit -> classify
//! ```

use crate::context::{Classification, WriteContext};
use crate::converter::ElementConverter;
use crate::list::{self, ListType};
use crate::root::{DocumentRootResolver, RootOutcome, RootResolver};
use crate::shape::Shape;
use jsonapi_format::constants::DATA;
use jsonapi_format::{JsonApiError, Result};
use jsonapi_stream::navigator::{enter_read, enter_write, exit_read, exit_write, iterate_array};
use jsonapi_stream::{TokenReader, TokenWriter};
use tracing::{debug, trace};

/// Converter for lists of resource objects
///
/// Holds no per-call state and can be shared across threads and reused for
/// any number of conversions.
#[derive(Debug, Clone, Default)]
pub struct ResourceListConverter<C, R = DocumentRootResolver> {
    elements: C,
    root: R,
}

impl<C: ElementConverter> ResourceListConverter<C> {
    /// List converter that recognizes document roots
    pub fn new(elements: C) -> Self {
        Self {
            elements,
            root: DocumentRootResolver,
        }
    }
}

impl<C, R> ResourceListConverter<C, R>
where
    C: ElementConverter,
    R: RootResolver,
{
    /// List converter with a custom root resolver
    pub fn with_root_resolver(elements: C, root: R) -> Self {
        Self { elements, root }
    }

    /// Converter used for each element
    pub fn element_converter(&self) -> &C {
        &self.elements
    }

    /// True if `shape` is a list whose elements the element converter accepts
    ///
    /// Lists of plain attribute values are never claimed.
    pub fn can_convert(&self, shape: &Shape) -> bool {
        list::element_shape(shape).is_some_and(|element| self.elements.can_convert(element))
    }

    /// Read a list positioned before its enclosing fragment
    pub fn read<L>(&self, reader: &mut TokenReader) -> Result<L>
    where
        L: ListType<Element = C::Element>,
    {
        if let RootOutcome::Root(list) = self.root.try_read_root::<L, C>(reader, &self.elements)? {
            debug!("list read delegated to document root");
            return Ok(list);
        }

        let target = L::shape();
        if list::element_shape(&target).is_none() {
            return Err(JsonApiError::InvalidTargetType {
                expected: "list of resources".to_string(),
                found: target.to_string(),
            });
        }

        let marker = enter_read(reader, DATA)?;
        let elements = &self.elements;
        let items = iterate_array(reader, |r| elements.read(r))?;
        let list = L::build(items)?;
        exit_read(reader, marker)?;

        Ok(list)
    }

    /// Write a list; `None` is written as an empty array
    ///
    /// After the array is closed, a classifying context is told the value was
    /// a relationship. This happens strictly after every element write, so a
    /// classification recorded by a nested value never outlives this one.
    pub fn write<L>(
        &self,
        writer: &mut TokenWriter,
        value: Option<&L>,
        ctx: &mut dyn WriteContext,
    ) -> Result<()>
    where
        L: ListType<Element = C::Element>,
    {
        if let RootOutcome::Root(()) =
            self.root
                .try_write_root::<L, C>(writer, value, &self.elements, ctx)?
        {
            debug!("list write delegated to document root");
            return Ok(());
        }

        let marker = enter_write(writer, DATA)?;
        writer.write_start_array()?;
        if let Some(list) = value {
            for item in list.elements() {
                trace!(path = %writer.path(), "writing element");
                self.elements.write(writer, item, ctx)?;
            }
        }
        writer.write_end_array()?;
        exit_write(writer, marker)?;

        // Only lists of resource objects reach this converter, so the value
        // just written is relationship linkage.
        if ctx.supports_classification() {
            ctx.set_classification(Classification::Relationship);
            debug!(path = %writer.path(), "classified list as relationship");
        }

        Ok(())
    }
}
