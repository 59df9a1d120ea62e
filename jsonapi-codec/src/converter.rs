//! Per-element converter contract

use crate::context::WriteContext;
use crate::shape::Shape;
use jsonapi_format::Result;
use jsonapi_stream::{TokenReader, TokenWriter};

/// Converts one element between its native form and the token stream
///
/// `read` must consume exactly one complete value; `write` must emit exactly
/// one. Failures are returned as-is and abort the enclosing list.
pub trait ElementConverter: Send + Sync {
    /// Native element type
    type Element;

    /// True if this converter handles values of `shape`
    fn can_convert(&self, shape: &Shape) -> bool;

    /// Read one element starting at the next token
    fn read(&self, reader: &mut TokenReader) -> Result<Self::Element>;

    /// Write one element
    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &Self::Element,
        ctx: &mut dyn WriteContext,
    ) -> Result<()>;
}

impl<C: ElementConverter + ?Sized> ElementConverter for &C {
    type Element = C::Element;

    fn can_convert(&self, shape: &Shape) -> bool {
        (**self).can_convert(shape)
    }

    fn read(&self, reader: &mut TokenReader) -> Result<Self::Element> {
        (**self).read(reader)
    }

    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &Self::Element,
        ctx: &mut dyn WriteContext,
    ) -> Result<()> {
        (**self).write(writer, value, ctx)
    }
}
