//! Write-time context threaded through nested conversions
//!
//! Whether a member value is an attribute or a relationship is only known
//! once it has been written. Converters report it through the context they
//! were handed; the last writer to report wins, so an ancestor reports after
//! all of its descendants have finished.

use tracing::trace;

/// Attribute-vs-relationship classification of a written member value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Plain attribute value
    Attribute,
    /// Relationship linkage (`{"data": ...}`)
    Relationship,
}

/// Side channel passed by reference through every write call
pub trait WriteContext {
    /// True if this context records classifications
    fn supports_classification(&self) -> bool {
        false
    }

    /// Record the classification of the value just written
    fn set_classification(&mut self, _kind: Classification) {}

    /// Last recorded classification
    fn classification(&self) -> Option<Classification> {
        None
    }
}

/// Context that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl WriteContext for NoContext {}

/// Context used to find out where a member value belongs in a resource object
///
/// Write one member value with the probe as context, then ask
/// [`AttributeOrRelationshipProbe::property_type`]. Values nobody classified
/// are attributes.
#[derive(Debug, Clone, Default)]
pub struct AttributeOrRelationshipProbe {
    kind: Option<Classification>,
}

impl AttributeOrRelationshipProbe {
    /// Fresh probe with no classification recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification of the probed value, defaulting to attribute
    pub fn property_type(&self) -> Classification {
        self.kind.unwrap_or(Classification::Attribute)
    }

    /// Forget the recorded classification before probing the next member
    pub fn reset(&mut self) {
        self.kind = None;
    }
}

impl WriteContext for AttributeOrRelationshipProbe {
    fn supports_classification(&self) -> bool {
        true
    }

    fn set_classification(&mut self, kind: Classification) {
        trace!(?kind, previous = ?self.kind, "classification recorded");
        self.kind = Some(kind);
    }

    fn classification(&self) -> Option<Classification> {
        self.kind
    }
}
