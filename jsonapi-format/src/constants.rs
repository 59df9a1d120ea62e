//! Member names fixed by the JSON:API document format

/// Primary data member of a document or relationship object.
pub const DATA: &str = "data";
/// Resource type member of a resource object or identifier.
pub const TYPE: &str = "type";
/// Resource id member of a resource object or identifier.
pub const ID: &str = "id";
/// Non-standard meta-information member.
pub const META: &str = "meta";
/// Links member.
pub const LINKS: &str = "links";
/// Compound document side-loaded resources.
pub const INCLUDED: &str = "included";
/// Top-level error collection.
pub const ERRORS: &str = "errors";
/// Implementation information member.
pub const JSONAPI: &str = "jsonapi";
/// Attributes member of a resource object.
pub const ATTRIBUTES: &str = "attributes";
/// Relationships member of a resource object.
pub const RELATIONSHIPS: &str = "relationships";
