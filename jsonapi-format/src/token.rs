//! Token model shared by the reader and writer cursors

use serde_json::Value;

/// One token of a streamed JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum JsonToken {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// Member name inside an object
    PropertyName(String),
    /// Null, boolean, number or string
    Scalar(Value),
}

impl JsonToken {
    /// True for tokens that open a container
    pub fn is_start(&self) -> bool {
        matches!(self, JsonToken::StartObject | JsonToken::StartArray)
    }

    /// True for tokens that close a container
    pub fn is_end(&self) -> bool {
        matches!(self, JsonToken::EndObject | JsonToken::EndArray)
    }

    /// Human-readable token kind for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            JsonToken::StartObject => "start of object",
            JsonToken::EndObject => "end of object",
            JsonToken::StartArray => "start of array",
            JsonToken::EndArray => "end of array",
            JsonToken::PropertyName(_) => "property name",
            JsonToken::Scalar(value) => type_name(value),
        }
    }
}

/// Get a human-readable type name
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

enum Work {
    Value(Value),
    Token(JsonToken),
}

/// Flatten a value into its token sequence, depth first
///
/// Works off an explicit stack, so arbitrarily deep values are flattened
/// without recursion. Nesting limits are applied later by the reader.
pub fn tokenize(value: Value, out: &mut Vec<JsonToken>) {
    let mut work = vec![Work::Value(value)];
    while let Some(item) = work.pop() {
        match item {
            Work::Token(token) => out.push(token),
            Work::Value(Value::Object(map)) => {
                out.push(JsonToken::StartObject);
                work.push(Work::Token(JsonToken::EndObject));
                for (key, member) in map.into_iter().rev() {
                    work.push(Work::Value(member));
                    work.push(Work::Token(JsonToken::PropertyName(key)));
                }
            }
            Work::Value(Value::Array(items)) => {
                out.push(JsonToken::StartArray);
                work.push(Work::Token(JsonToken::EndArray));
                work.extend(items.into_iter().rev().map(Work::Value));
            }
            Work::Value(scalar) => out.push(JsonToken::Scalar(scalar)),
        }
    }
}
