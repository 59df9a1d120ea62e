//! Fakes and recorders for the converter collaborator contracts

use jsonapi_codec::{
    Classification, ElementConverter, IdentifierConverter, JsonApiError, ListType,
    ResourceIdentifier, Result, RootOutcome, RootResolver, Shape, TokenReader, TokenWriter,
    WriteContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Element converter wrapper that counts every call
#[derive(Debug, Default)]
pub struct CountingConverter<C> {
    inner: C,
    can_convert_calls: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl<C> CountingConverter<C> {
    /// Wrap `inner`
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            can_convert_calls: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Calls to `can_convert`
    pub fn can_convert_calls(&self) -> usize {
        self.can_convert_calls.load(Ordering::SeqCst)
    }

    /// Calls to `read`
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Calls to `write`
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Total calls of any kind
    pub fn total_calls(&self) -> usize {
        self.can_convert_calls() + self.reads() + self.writes()
    }
}

impl<C: ElementConverter> ElementConverter for CountingConverter<C> {
    type Element = C::Element;

    fn can_convert(&self, shape: &Shape) -> bool {
        self.can_convert_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.can_convert(shape)
    }

    fn read(&self, reader: &mut TokenReader) -> Result<Self::Element> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(reader)
    }

    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &Self::Element,
        ctx: &mut dyn WriteContext,
    ) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(writer, value, ctx)
    }
}

/// Identifier converter that fails on the read with the given zero-based index
#[derive(Debug)]
pub struct FailingConverter {
    fail_at: usize,
    reads: AtomicUsize,
}

impl FailingConverter {
    /// Fail on read number `fail_at` (zero-based)
    pub fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            reads: AtomicUsize::new(0),
        }
    }

    /// Reads attempted so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ElementConverter for FailingConverter {
    type Element = ResourceIdentifier;

    fn can_convert(&self, shape: &Shape) -> bool {
        IdentifierConverter.can_convert(shape)
    }

    fn read(&self, reader: &mut TokenReader) -> Result<ResourceIdentifier> {
        let idx = self.reads.fetch_add(1, Ordering::SeqCst);
        if idx == self.fail_at {
            let path = reader.next_value_path().to_string();
            debug!(index = idx, %path, "injecting element failure");
            reader.skip_value()?;
            return Err(JsonApiError::element(path, "injected element failure"));
        }
        IdentifierConverter.read(reader)
    }

    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &ResourceIdentifier,
        ctx: &mut dyn WriteContext,
    ) -> Result<()> {
        IdentifierConverter.write(writer, value, ctx)
    }
}

/// Identifier converter whose writes also classify a nested attribute
///
/// Stands in for resource objects that write their own attribute arrays
/// through the same context.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassifyingConverter;

impl ElementConverter for ClassifyingConverter {
    type Element = ResourceIdentifier;

    fn can_convert(&self, shape: &Shape) -> bool {
        IdentifierConverter.can_convert(shape)
    }

    fn read(&self, reader: &mut TokenReader) -> Result<ResourceIdentifier> {
        IdentifierConverter.read(reader)
    }

    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &ResourceIdentifier,
        ctx: &mut dyn WriteContext,
    ) -> Result<()> {
        IdentifierConverter.write(writer, value, ctx)?;
        if ctx.supports_classification() {
            ctx.set_classification(Classification::Attribute);
        }
        Ok(())
    }
}

/// Root resolver that claims every conversion without touching the cursor
///
/// Reads produce an empty list; writes emit nothing.
#[derive(Debug, Default)]
pub struct AlwaysRootResolver {
    calls: AtomicUsize,
}

impl AlwaysRootResolver {
    /// Number of resolution requests seen
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RootResolver for AlwaysRootResolver {
    fn try_read_root<L, C>(&self, _reader: &mut TokenReader, _elements: &C) -> Result<RootOutcome<L>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RootOutcome::Root(L::build(std::iter::empty())?))
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RootOutcome::Root(()))
    }
}

/// Root resolver that never claims a conversion and counts requests
#[derive(Debug, Default)]
pub struct RecordingResolver {
    calls: AtomicUsize,
}

impl RecordingResolver {
    /// Number of resolution requests seen
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RootResolver for RecordingResolver {
    fn try_read_root<L, C>(&self, _reader: &mut TokenReader, _elements: &C) -> Result<RootOutcome<L>>
    where
        C: ElementConverter,
        L: ListType<Element = C::Element>,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RootOutcome::Nested)
    }
}

/// Write context that keeps every classification in order
#[derive(Debug, Default, Clone)]
pub struct RecordingContext {
    events: Vec<Classification>,
}

impl RecordingContext {
    /// Classifications in the order they were recorded
    pub fn events(&self) -> &[Classification] {
        &self.events
    }
}

impl WriteContext for RecordingContext {
    fn supports_classification(&self) -> bool {
        true
    }

    fn set_classification(&mut self, kind: Classification) {
        self.events.push(kind);
    }

    fn classification(&self) -> Option<Classification> {
        self.events.last().copied()
    }
}
