//! Navigation into and out of a named member such as `data`
//!
//! Reading and writing a nested collection always happens through the same
//! three steps: enter the member, stream the array, exit. Entering returns
//! a marker that must be handed back, unchanged, to the matching exit call.
//! Markers are consumed by value so one cannot be restored twice.

use crate::reader::TokenReader;
use crate::writer::TokenWriter;
use jsonapi_format::{JsonApiError, JsonToken, Result};
use std::iter::FusedIterator;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// The member name was already consumed by the caller
    Inline,
    /// The enclosing object was opened by the navigator
    Wrapped,
}

/// Position saved by [`enter_read`]
#[derive(Debug)]
#[must_use = "a read marker must be passed to exit_read"]
pub struct ReadMarker {
    scope: Scope,
    depth: usize,
    skipped: Vec<String>,
}

impl ReadMarker {
    /// Members of the enclosing object skipped before the target member
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// True when the navigator opened the enclosing object itself
    pub fn is_wrapped(&self) -> bool {
        self.scope == Scope::Wrapped
    }
}

/// Position saved by [`enter_write`]
#[derive(Debug)]
#[must_use = "a write marker must be passed to exit_write"]
pub struct WriteMarker {
    scope: Scope,
    depth: usize,
}

impl WriteMarker {
    /// True when the navigator opened the enclosing object itself
    pub fn is_wrapped(&self) -> bool {
        self.scope == Scope::Wrapped
    }
}

/// Position the reader at the value of `member`
///
/// If the caller already consumed the member name the reader is left where
/// it is. Otherwise the next token must open an object; its members are
/// skipped until `member` is found.
pub fn enter_read(reader: &mut TokenReader, member: &str) -> Result<ReadMarker> {
    if reader.pending_property() == Some(member) {
        trace!(path = %reader.path(), member, "member already entered");
        return Ok(ReadMarker {
            scope: Scope::Inline,
            depth: reader.depth(),
            skipped: Vec::new(),
        });
    }

    let path = reader.path().to_string();
    match reader.next_token()? {
        JsonToken::StartObject => {}
        other => {
            return Err(JsonApiError::malformed(
                path,
                format!(
                    "expected an object holding '{}', found {}",
                    member,
                    other.kind()
                ),
            ))
        }
    }

    let depth = reader.depth();
    let mut skipped = Vec::new();
    loop {
        match reader.next_token()? {
            JsonToken::PropertyName(name) if name == member => {
                debug!(path = %reader.path(), skipped = ?skipped, "entered member");
                return Ok(ReadMarker {
                    scope: Scope::Wrapped,
                    depth,
                    skipped,
                });
            }
            JsonToken::PropertyName(name) => {
                reader.skip_value()?;
                skipped.push(name);
            }
            JsonToken::EndObject => {
                return Err(JsonApiError::malformed(
                    path,
                    format!("object has no '{}' member", member),
                ))
            }
            other => {
                return Err(JsonApiError::malformed(
                    reader.path().to_string(),
                    format!("expected property name, found {}", other.kind()),
                ))
            }
        }
    }
}

/// Return the reader to the level saved in `marker`
///
/// Anything left inside the enclosing object (trailing members, or
/// elements a consumer stopped pulling) is skipped. Returns the names of
/// trailing members that were skipped.
pub fn exit_read(reader: &mut TokenReader, marker: ReadMarker) -> Result<Vec<String>> {
    let mut trailing = Vec::new();
    match marker.scope {
        Scope::Inline => {
            while reader.depth() > marker.depth {
                reader.next_token()?;
            }
        }
        Scope::Wrapped => {
            while reader.depth() >= marker.depth {
                let at_level = reader.depth() == marker.depth;
                if let JsonToken::PropertyName(name) = reader.next_token()? {
                    if at_level {
                        trailing.push(name);
                    }
                }
            }
        }
    }
    debug!(path = %reader.path(), trailing = ?trailing, "exited member");
    Ok(trailing)
}

/// Lazily read the array under the cursor, one element per `next`
///
/// `null` is accepted as an empty array. The returned iterator mutably
/// borrows the reader: it is single-pass and cannot be replayed. It is
/// fused after the closing bracket or after the first error.
pub fn iterate_array<T, F>(reader: &mut TokenReader, read_element: F) -> Result<ArrayElements<'_, F>>
where
    F: FnMut(&mut TokenReader) -> Result<T>,
{
    let path = reader.path().to_string();
    let done = match reader.next_token()? {
        JsonToken::StartArray => false,
        JsonToken::Scalar(serde_json::Value::Null) => true,
        other => {
            return Err(JsonApiError::malformed(
                path,
                format!("expected array, found {}", other.kind()),
            ))
        }
    };

    let depth = reader.depth();
    let max_len = reader.limits().max_list_len;
    Ok(ArrayElements {
        reader,
        read_element,
        depth,
        yielded: 0,
        max_len,
        done,
    })
}

/// Lazy element sequence returned by [`iterate_array`]
pub struct ArrayElements<'r, F> {
    reader: &'r mut TokenReader,
    read_element: F,
    depth: usize,
    yielded: usize,
    max_len: usize,
    done: bool,
}

impl<F> ArrayElements<'_, F> {
    /// Number of elements pulled so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn fail(&mut self, err: JsonApiError) -> Option<JsonApiError> {
        self.done = true;
        Some(err)
    }
}

impl<T, F> Iterator for ArrayElements<'_, F>
where
    F: FnMut(&mut TokenReader) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.peek() {
            Some(JsonToken::EndArray) => {
                self.done = true;
                return match self.reader.next_token() {
                    Ok(_) => None,
                    Err(err) => Some(Err(err)),
                };
            }
            None => {
                let err = JsonApiError::UnexpectedEnd {
                    path: self.reader.path().to_string(),
                };
                return self.fail(err).map(Err);
            }
            Some(_) => {}
        }

        if self.yielded >= self.max_len {
            let err = JsonApiError::LimitExceeded(format!(
                "array at '{}' has more than max_list_len {} elements",
                self.reader.path(),
                self.max_len
            ));
            return self.fail(err).map(Err);
        }

        let path = self.reader.next_value_path();
        let index = self.reader.array_index().unwrap_or_default();
        trace!(%path, "reading element");
        let item = match (self.read_element)(&mut *self.reader) {
            Ok(item) => item,
            Err(err) => return self.fail(err).map(Err),
        };

        // Depth back at the array and exactly one more index started.
        let consumed = match self.reader.array_index() {
            Some(next) if self.reader.depth() == self.depth && next >= index => next - index,
            _ => usize::MAX,
        };
        if consumed != 1 {
            let reason = match consumed {
                0 => "element converter consumed no element".to_string(),
                usize::MAX => "element converter left the array".to_string(),
                n => format!("element converter consumed {} elements", n),
            };
            return self.fail(JsonApiError::malformed(path.to_string(), reason)).map(Err);
        }

        self.yielded += 1;
        Some(Ok(item))
    }
}

impl<T, F> FusedIterator for ArrayElements<'_, F> where F: FnMut(&mut TokenReader) -> Result<T> {}

/// Prepare the writer for the value of `member`
///
/// If the caller already wrote the member name nothing is written;
/// otherwise `{"member":` is opened.
pub fn enter_write(writer: &mut TokenWriter, member: &str) -> Result<WriteMarker> {
    if writer.pending_property() == Some(member) {
        return Ok(WriteMarker {
            scope: Scope::Inline,
            depth: writer.depth(),
        });
    }

    writer.write_start_object()?;
    let depth = writer.depth();
    writer.write_property_name(member)?;
    Ok(WriteMarker {
        scope: Scope::Wrapped,
        depth,
    })
}

/// Close whatever [`enter_write`] opened
pub fn exit_write(writer: &mut TokenWriter, marker: WriteMarker) -> Result<()> {
    if writer.depth() != marker.depth || writer.pending_property().is_some() {
        return Err(JsonApiError::malformed(
            writer.path().to_string(),
            "member value left unfinished",
        ));
    }
    if marker.scope == Scope::Wrapped {
        writer.write_end_object()?;
    }
    Ok(())
}
