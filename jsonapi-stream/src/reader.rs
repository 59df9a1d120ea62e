//! Pull cursor over the tokens of a JSON document

use crate::limited::LimitedReader;
use jsonapi_format::token::{tokenize, type_name};
use jsonapi_format::{JsonApiError, JsonPath, JsonToken, Limits, PathSegment, Result};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::io::{BufReader, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array { next_index: usize },
}

/// Token cursor with path tracking
///
/// The cursor starts positioned before the first token. Every call to
/// [`TokenReader::next_token`] advances it by one token and keeps
/// [`TokenReader::path`] pointing at the value currently being read.
#[derive(Debug)]
pub struct TokenReader {
    tokens: VecDeque<JsonToken>,
    stack: Vec<Frame>,
    path: JsonPath,
    pending_property: bool,
    consumed: usize,
    limits: Limits,
}

impl TokenReader {
    /// Create a reader over an already parsed document
    pub fn from_value(document: Value, limits: Limits) -> Result<Self> {
        limits.validate()?;

        let mut tokens = Vec::new();
        tokenize(document, &mut tokens);

        Ok(Self {
            tokens: tokens.into(),
            stack: Vec::new(),
            path: JsonPath::root(),
            pending_property: false,
            consumed: 0,
            limits,
        })
    }

    /// Parse a document from text
    pub fn from_str(input: &str, limits: Limits) -> Result<Self> {
        Self::from_slice(input.as_bytes(), limits)
    }

    /// Parse a document from bytes
    pub fn from_slice(input: &[u8], limits: Limits) -> Result<Self> {
        limits.validate()?;
        if input.len() > limits.max_document_bytes {
            return Err(JsonApiError::LimitExceeded(format!(
                "document is {} bytes (max: {})",
                input.len(),
                limits.max_document_bytes
            )));
        }
        let document: Value = serde_json::from_slice(input)?;
        Self::from_value(document, limits)
    }

    /// Parse a document from a reader, buffering at most `max_document_bytes`
    pub fn from_reader<R: Read>(reader: R, limits: Limits) -> Result<Self> {
        limits.validate()?;

        let mut limited = LimitedReader::new(BufReader::new(reader), limits.max_document_bytes);
        let document: Value = serde_json::from_reader(&mut limited).map_err(|e| {
            if limited.limit_exceeded() {
                JsonApiError::LimitExceeded(format!(
                    "buffered {} bytes before the document ended (max: {})",
                    limited.bytes_read(),
                    limits.max_document_bytes
                ))
            } else if e.is_io() {
                JsonApiError::Io(e.into())
            } else {
                JsonApiError::Json(e)
            }
        })?;

        Self::from_value(document, limits)
    }

    /// Limits this reader enforces
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Path of the value under the cursor
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Path the next value will be read at
    ///
    /// Differs from [`TokenReader::path`] only between array elements, where
    /// it already includes the index of the upcoming element.
    pub fn next_value_path(&self) -> JsonPath {
        let mut path = self.path.clone();
        if let Some(Frame::Array { next_index }) = self.stack.last() {
            path.push(PathSegment::Index(*next_index));
        }
        path
    }

    /// Index the next element of the innermost array will get
    ///
    /// `None` unless the innermost open container is an array.
    pub fn array_index(&self) -> Option<usize> {
        match self.stack.last() {
            Some(Frame::Array { next_index }) => Some(*next_index),
            _ => None,
        }
    }

    /// Number of containers currently open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// True once every token has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Member name whose value is the next thing to be read
    ///
    /// `Some` only directly after a property name token was consumed.
    pub fn pending_property(&self) -> Option<&str> {
        if !self.pending_property {
            return None;
        }
        match self.path.last() {
            Some(PathSegment::Property(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<&JsonToken> {
        self.tokens.front()
    }

    /// Consume the next token
    pub fn next_token(&mut self) -> Result<JsonToken> {
        let token = self
            .tokens
            .pop_front()
            .ok_or_else(|| JsonApiError::UnexpectedEnd {
                path: self.path.to_string(),
            })?;
        self.consumed += 1;

        let value_start = matches!(
            token,
            JsonToken::StartObject | JsonToken::StartArray | JsonToken::Scalar(_)
        );
        if value_start {
            self.enter_value()?;
        }

        match &token {
            JsonToken::StartObject => self.open(Frame::Object)?,
            JsonToken::StartArray => self.open(Frame::Array { next_index: 0 })?,
            JsonToken::EndObject => {
                if self.pending_property {
                    return Err(JsonApiError::malformed(
                        self.path.to_string(),
                        "object ended before member value",
                    ));
                }
                self.close(Frame::Object)?;
            }
            JsonToken::EndArray => self.close(Frame::Array { next_index: 0 })?,
            JsonToken::PropertyName(name) => {
                if self.stack.last() != Some(&Frame::Object) || self.pending_property {
                    return Err(JsonApiError::malformed(
                        self.path.to_string(),
                        format!("unexpected property name '{}'", name),
                    ));
                }
                self.path.push(PathSegment::Property(name.clone()));
                self.pending_property = true;
            }
            JsonToken::Scalar(_) => self.complete_value(),
        }

        Ok(token)
    }

    /// Consume the next token, failing unless it equals `expected`
    pub fn expect(&mut self, expected: JsonToken) -> Result<()> {
        let path = self.path.to_string();
        let token = self.next_token()?;
        if token != expected {
            return Err(JsonApiError::malformed(
                path,
                format!("expected {}, found {}", expected.kind(), token.kind()),
            ));
        }
        Ok(())
    }

    /// Skip one complete value
    pub fn skip_value(&mut self) -> Result<()> {
        let start_depth = self.depth();
        let path = self.path.to_string();
        match self.next_token()? {
            JsonToken::Scalar(_) => Ok(()),
            JsonToken::StartObject | JsonToken::StartArray => {
                while self.depth() > start_depth {
                    self.next_token()?;
                }
                Ok(())
            }
            other => Err(JsonApiError::malformed(
                path,
                format!("expected a value, found {}", other.kind()),
            )),
        }
    }

    /// Consume one complete value and materialize it
    pub fn read_value(&mut self) -> Result<Value> {
        let path = self.path.to_string();
        match self.next_token()? {
            JsonToken::Scalar(value) => Ok(value),
            JsonToken::StartObject => {
                let mut map = Map::new();
                loop {
                    match self.next_token()? {
                        JsonToken::EndObject => return Ok(Value::Object(map)),
                        JsonToken::PropertyName(name) => {
                            let member = self.read_value()?;
                            map.insert(name, member);
                        }
                        other => {
                            return Err(JsonApiError::malformed(
                                self.path.to_string(),
                                format!("expected property name, found {}", other.kind()),
                            ))
                        }
                    }
                }
            }
            JsonToken::StartArray => {
                let mut items = Vec::new();
                while self.peek() != Some(&JsonToken::EndArray) {
                    items.push(self.read_value()?);
                }
                self.next_token()?;
                Ok(Value::Array(items))
            }
            other => Err(JsonApiError::malformed(
                path,
                format!("expected a value, found {}", other.kind()),
            )),
        }
    }

    /// Read a member value that must be a string
    pub fn read_string(&mut self) -> Result<String> {
        let path = self.path.to_string();
        match self.next_token()? {
            JsonToken::Scalar(Value::String(s)) => Ok(s),
            JsonToken::Scalar(other) => Err(JsonApiError::malformed(
                path,
                format!("expected string, found {}", type_name(&other)),
            )),
            other => Err(JsonApiError::malformed(
                path,
                format!("expected string, found {}", other.kind()),
            )),
        }
    }

    fn enter_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Array { next_index }) => {
                let idx = *next_index;
                *next_index += 1;
                self.path.push(PathSegment::Index(idx));
            }
            Some(Frame::Object) => {
                if !self.pending_property {
                    return Err(JsonApiError::malformed(
                        self.path.to_string(),
                        "value without a member name",
                    ));
                }
                self.pending_property = false;
            }
            None => {
                if self.consumed > 1 {
                    return Err(JsonApiError::malformed(
                        self.path.to_string(),
                        "more than one top-level value",
                    ));
                }
            }
        }
        Ok(())
    }

    fn open(&mut self, frame: Frame) -> Result<()> {
        if self.stack.len() >= self.limits.max_depth {
            return Err(JsonApiError::LimitExceeded(format!(
                "nesting depth {} at '{}' exceeds max_depth {}",
                self.stack.len() + 1,
                self.path,
                self.limits.max_depth
            )));
        }
        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self, kind: Frame) -> Result<()> {
        let matches = matches!(
            (self.stack.last(), kind),
            (Some(Frame::Object), Frame::Object) | (Some(Frame::Array { .. }), Frame::Array { .. })
        );
        if !matches {
            return Err(JsonApiError::malformed(
                self.path.to_string(),
                "container closed by the wrong token",
            ));
        }
        self.stack.pop();
        self.complete_value();
        Ok(())
    }

    fn complete_value(&mut self) {
        if !self.stack.is_empty() {
            self.path.pop();
        }
    }
}
