//! Fixture builders for documents and identifier lists

use jsonapi_codec::ResourceIdentifier;
use serde_json::{json, Map, Value};

/// `count` identifiers of type `kind` with ids `"0"`, `"1"`, ...
pub fn identifiers(kind: &str, count: usize) -> Vec<ResourceIdentifier> {
    (0..count)
        .map(|i| ResourceIdentifier::new(kind, i.to_string()))
        .collect()
}

/// Builder for resource objects with attributes and relationships
pub struct DocumentBuilder {
    kind: String,
    id: String,
    attributes: Map<String, Value>,
    relationships: Map<String, Value>,
}

impl DocumentBuilder {
    /// Start a resource object
    pub fn resource(kind: &str, id: &str) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
            attributes: Map::new(),
            relationships: Map::new(),
        }
    }

    /// Add an attribute
    pub fn attribute(mut self, name: &str, value: Value) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    /// Add a to-many relationship with links around its linkage
    pub fn to_many(mut self, name: &str, linkage: &[ResourceIdentifier]) -> Self {
        let data: Vec<Value> = linkage
            .iter()
            .map(|id| json!({"type": id.kind, "id": id.id}))
            .collect();
        self.relationships.insert(
            name.to_string(),
            json!({
                "links": {"related": format!("/{}/{}/{}", self.kind, self.id, name)},
                "data": data,
                "meta": {"count": linkage.len()}
            }),
        );
        self
    }

    /// Build the resource object
    pub fn build(self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.kind));
        object.insert("id".to_string(), Value::String(self.id));
        if !self.attributes.is_empty() {
            object.insert("attributes".to_string(), Value::Object(self.attributes));
        }
        if !self.relationships.is_empty() {
            object.insert(
                "relationships".to_string(),
                Value::Object(self.relationships),
            );
        }
        Value::Object(object)
    }

    /// Wrap the resource in a single-resource document
    pub fn into_document(self) -> Value {
        json!({"data": self.build()})
    }
}
