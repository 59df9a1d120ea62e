//! Token writer that assembles a JSON document

use jsonapi_format::token::tokenize;
use jsonapi_format::{JsonApiError, JsonPath, JsonToken, Limits, PathSegment, Result};
use serde_json::{Map, Value};

#[derive(Debug)]
enum Partial {
    Object {
        members: Map<String, Value>,
        pending: Option<String>,
    },
    Array(Vec<Value>),
}

/// Push cursor that validates token nesting and builds a [`Value`]
#[derive(Debug)]
pub struct TokenWriter {
    stack: Vec<Partial>,
    root: Option<Value>,
    path: JsonPath,
    written: usize,
    limits: Limits,
}

impl TokenWriter {
    /// Create an empty writer
    pub fn new(limits: Limits) -> Self {
        Self {
            stack: Vec::new(),
            root: None,
            path: JsonPath::root(),
            written: 0,
            limits,
        }
    }

    /// Path of the value being written
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Number of containers currently open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of tokens written so far
    pub fn position(&self) -> usize {
        self.written
    }

    /// Limits this writer enforces
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Member name whose value is expected next
    pub fn pending_property(&self) -> Option<&str> {
        match self.stack.last() {
            Some(Partial::Object {
                pending: Some(name),
                ..
            }) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Write one token
    pub fn write_token(&mut self, token: JsonToken) -> Result<()> {
        match token {
            JsonToken::StartObject => {
                self.begin_value()?;
                self.open(Partial::Object {
                    members: Map::new(),
                    pending: None,
                })?;
            }
            JsonToken::StartArray => {
                self.begin_value()?;
                self.open(Partial::Array(Vec::new()))?;
            }
            JsonToken::EndObject => match self.stack.pop() {
                Some(Partial::Object {
                    members,
                    pending: None,
                }) => self.attach(Value::Object(members)),
                other => return Err(self.mismatched_end(other, "object")),
            },
            JsonToken::EndArray => match self.stack.pop() {
                Some(Partial::Array(items)) => self.attach(Value::Array(items)),
                other => return Err(self.mismatched_end(other, "array")),
            },
            JsonToken::PropertyName(name) => match self.stack.last_mut() {
                Some(Partial::Object { pending, .. }) if pending.is_none() => {
                    self.path.push(PathSegment::Property(name.clone()));
                    *pending = Some(name);
                }
                _ => {
                    return Err(JsonApiError::malformed(
                        self.path.to_string(),
                        format!("property name '{}' outside of an object", name),
                    ))
                }
            },
            JsonToken::Scalar(value) => {
                self.begin_value()?;
                self.attach(value);
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Open an object
    pub fn write_start_object(&mut self) -> Result<()> {
        self.write_token(JsonToken::StartObject)
    }

    /// Close the innermost object
    pub fn write_end_object(&mut self) -> Result<()> {
        self.write_token(JsonToken::EndObject)
    }

    /// Open an array
    pub fn write_start_array(&mut self) -> Result<()> {
        self.write_token(JsonToken::StartArray)
    }

    /// Close the innermost array
    pub fn write_end_array(&mut self) -> Result<()> {
        self.write_token(JsonToken::EndArray)
    }

    /// Name the next member of the innermost object
    pub fn write_property_name(&mut self, name: &str) -> Result<()> {
        self.write_token(JsonToken::PropertyName(name.to_string()))
    }

    /// Write a whole value
    pub fn write_value(&mut self, value: Value) -> Result<()> {
        let mut tokens = Vec::new();
        tokenize(value, &mut tokens);
        for token in tokens {
            self.write_token(token)?;
        }
        Ok(())
    }

    /// Write `name: value` into the innermost object
    pub fn write_member(&mut self, name: &str, value: Value) -> Result<()> {
        self.write_property_name(name)?;
        self.write_value(value)
    }

    /// Finish the document and return it
    pub fn into_value(self) -> Result<Value> {
        if !self.stack.is_empty() {
            return Err(JsonApiError::UnexpectedEnd {
                path: self.path.to_string(),
            });
        }
        self.root.ok_or_else(|| JsonApiError::UnexpectedEnd {
            path: JsonPath::root().to_string(),
        })
    }

    fn begin_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            Some(Partial::Array(items)) => {
                self.path.push(PathSegment::Index(items.len()));
                Ok(())
            }
            Some(Partial::Object { pending, .. }) => {
                if pending.is_none() {
                    return Err(JsonApiError::malformed(
                        self.path.to_string(),
                        "value without a member name",
                    ));
                }
                Ok(())
            }
            None if self.root.is_some() => Err(JsonApiError::malformed(
                self.path.to_string(),
                "more than one top-level value",
            )),
            None => Ok(()),
        }
    }

    fn open(&mut self, partial: Partial) -> Result<()> {
        if self.stack.len() >= self.limits.max_depth {
            return Err(JsonApiError::LimitExceeded(format!(
                "nesting depth {} at '{}' exceeds max_depth {}",
                self.stack.len() + 1,
                self.path,
                self.limits.max_depth
            )));
        }
        self.stack.push(partial);
        Ok(())
    }

    fn attach(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some(Partial::Object { members, pending }) => {
                if let Some(name) = pending.take() {
                    members.insert(name, value);
                }
                self.path.pop();
            }
            Some(Partial::Array(items)) => {
                items.push(value);
                self.path.pop();
            }
            None => self.root = Some(value),
        }
    }

    fn mismatched_end(&mut self, popped: Option<Partial>, closing: &str) -> JsonApiError {
        if let Some(partial) = popped {
            self.stack.push(partial);
        }
        JsonApiError::malformed(
            self.path.to_string(),
            format!("end of {} does not match the open container", closing),
        )
    }
}

impl Default for TokenWriter {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
