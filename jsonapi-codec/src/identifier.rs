//! Resource identifier objects, the elements of relationship linkage

use crate::context::WriteContext;
use crate::converter::ElementConverter;
use crate::shape::{Describe, Shape};
use jsonapi_format::constants::{ID, META, TYPE};
use jsonapi_format::{JsonApiError, JsonToken, Result};
use jsonapi_stream::{TokenReader, TokenWriter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{"type": ..., "id": ..., "meta": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource type
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource id
    pub id: String,
    /// Optional identifier meta
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ResourceIdentifier {
    /// Identifier without meta
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            meta: None,
        }
    }
}

impl Describe for ResourceIdentifier {
    fn shape() -> Shape {
        Shape::Resource("ResourceIdentifier")
    }
}

/// Streaming converter for [`ResourceIdentifier`]
///
/// Unknown members are skipped. Numeric ids are accepted and kept in
/// their textual form.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierConverter;

impl ElementConverter for IdentifierConverter {
    type Element = ResourceIdentifier;

    fn can_convert(&self, shape: &Shape) -> bool {
        *shape == ResourceIdentifier::shape()
    }

    fn read(&self, reader: &mut TokenReader) -> Result<ResourceIdentifier> {
        let path = reader.next_value_path().to_string();
        reader.expect(JsonToken::StartObject)?;

        let mut kind = None;
        let mut id = None;
        let mut meta = None;
        loop {
            match reader.next_token()? {
                JsonToken::EndObject => break,
                JsonToken::PropertyName(name) => match name.as_str() {
                    TYPE => kind = Some(reader.read_string()?),
                    ID => {
                        id = Some(match reader.read_value()? {
                            Value::String(s) => s,
                            Value::Number(n) => n.to_string(),
                            other => {
                                return Err(JsonApiError::element(
                                    reader.path().to_string(),
                                    format!("resource id must be a string, found {}", other),
                                ))
                            }
                        })
                    }
                    META => match reader.read_value()? {
                        Value::Object(map) => meta = Some(map),
                        Value::Null => {}
                        _ => {
                            return Err(JsonApiError::element(
                                reader.path().to_string(),
                                "identifier meta must be an object",
                            ))
                        }
                    },
                    _ => reader.skip_value()?,
                },
                other => {
                    return Err(JsonApiError::malformed(
                        reader.path().to_string(),
                        format!("expected property name, found {}", other.kind()),
                    ))
                }
            }
        }

        let kind = kind
            .ok_or_else(|| JsonApiError::element(path.clone(), "resource identifier has no 'type'"))?;
        let id =
            id.ok_or_else(|| JsonApiError::element(path, "resource identifier has no 'id'"))?;
        Ok(ResourceIdentifier { kind, id, meta })
    }

    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &ResourceIdentifier,
        _ctx: &mut dyn WriteContext,
    ) -> Result<()> {
        writer.write_start_object()?;
        writer.write_member(TYPE, Value::String(value.kind.clone()))?;
        writer.write_member(ID, Value::String(value.id.clone()))?;
        if let Some(meta) = &value.meta {
            writer.write_member(META, Value::Object(meta.clone()))?;
        }
        writer.write_end_object()
    }
}
