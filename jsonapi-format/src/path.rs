//! Cursor paths rendered in JSON Pointer (RFC 6901) notation

use std::fmt;

/// One step of a cursor path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member
    Property(String),
    /// Array element position
    Index(usize),
}

/// Location of a cursor inside a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Append a segment
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Remove the innermost segment
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Innermost segment, if any
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Mutable innermost segment, if any
    pub fn last_mut(&mut self) -> Option<&mut PathSegment> {
        self.segments.last_mut()
    }

    /// All segments from the root inward
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True at the document root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the innermost segment is the member `name`
    pub fn ends_with_property(&self, name: &str) -> bool {
        matches!(self.last(), Some(PathSegment::Property(p)) if p == name)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                PathSegment::Property(name) => write!(f, "/{}", escape_pointer_token(name))?,
                PathSegment::Index(idx) => write!(f, "/{}", idx)?,
            }
        }
        Ok(())
    }
}

/// Escape a string for use in a JSON Pointer
pub fn escape_pointer_token(token: &str) -> String {
    // Must escape ~ before / to avoid incorrect escaping
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescape a JSON Pointer token according to RFC 6901
pub fn unescape_pointer_token(token: &str) -> String {
    // Must process ~1 before ~0 to avoid double-unescaping
    token.replace("~1", "/").replace("~0", "~")
}
