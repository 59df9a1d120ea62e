//! Integration tests for the resource-list converter

use jsonapi_codec::{
    AttributeOrRelationshipProbe, Classification, ElementConverter, IdentifierConverter,
    JsonApiError, Limits, NestedOnly, ResourceIdentifier, ResourceListConverter, Result, Shape,
    TokenReader, TokenWriter, WriteContext,
};
use jsonapi_format::JsonToken;
use jsonapi_test_utils::{
    identifiers, init_tracing, AlwaysRootResolver, ClassifyingConverter, CountingConverter,
    DocumentBuilder, FailingConverter, RecordingContext, RecordingResolver,
};
use serde_json::{json, Map, Value};
use smallvec::SmallVec;
use std::collections::LinkedList;

fn reader(value: Value) -> TokenReader {
    TokenReader::from_value(value, Limits::default()).expect("reader")
}

#[test]
fn root_delegation_short_circuits_read() {
    init_tracing();
    let elements = CountingConverter::new(IdentifierConverter);
    let resolver = AlwaysRootResolver::default();
    let converter = ResourceListConverter::with_root_resolver(&elements, &resolver);

    let mut r = reader(json!({"data": [{"type": "t", "id": "1"}]}));
    let list: Vec<ResourceIdentifier> = converter.read(&mut r).unwrap();

    assert!(list.is_empty());
    assert_eq!(resolver.calls(), 1);
    assert_eq!(elements.total_calls(), 0);
    assert_eq!(r.position(), 0, "no navigation may happen");
}

#[test]
fn root_delegation_short_circuits_write() {
    init_tracing();
    let elements = CountingConverter::new(IdentifierConverter);
    let resolver = AlwaysRootResolver::default();
    let converter = ResourceListConverter::with_root_resolver(&elements, &resolver);

    let mut w = TokenWriter::default();
    let mut ctx = RecordingContext::default();
    let list = identifiers("tags", 3);
    converter.write(&mut w, Some(&list), &mut ctx).unwrap();

    assert_eq!(resolver.calls(), 1);
    assert_eq!(elements.total_calls(), 0);
    assert_eq!(w.position(), 0);
    assert!(ctx.events().is_empty());
}

#[test]
fn nested_conversion_consults_resolver_once() {
    let resolver = RecordingResolver::default();
    let converter = ResourceListConverter::with_root_resolver(IdentifierConverter, &resolver);

    let mut w = TokenWriter::default();
    let list = identifiers("tags", 2);
    converter.write(&mut w, Some(&list), &mut RecordingContext::default()).unwrap();
    let doc = w.into_value().unwrap();

    let mut r = reader(doc);
    let back: Vec<ResourceIdentifier> = converter.read(&mut r).unwrap();
    assert_eq!(back, list);
    assert_eq!(resolver.calls(), 2);
}

#[test]
fn classification_is_set_after_descendants() {
    let converter = ResourceListConverter::with_root_resolver(ClassifyingConverter, NestedOnly);
    let mut w = TokenWriter::default();
    let mut ctx = RecordingContext::default();
    let list = identifiers("tags", 2);

    converter.write(&mut w, Some(&list), &mut ctx).unwrap();

    assert_eq!(
        ctx.events(),
        [
            Classification::Attribute,
            Classification::Attribute,
            Classification::Relationship
        ]
    );
    assert_eq!(ctx.classification(), Some(Classification::Relationship));
}

#[test]
fn empty_and_absent_values_write_empty_data() {
    let converter = ResourceListConverter::with_root_resolver(IdentifierConverter, NestedOnly);

    let mut w = TokenWriter::default();
    converter
        .write::<Vec<ResourceIdentifier>>(&mut w, None, &mut RecordingContext::default())
        .unwrap();
    assert_eq!(w.into_value().unwrap(), json!({"data": []}));

    let mut w = TokenWriter::default();
    let empty: Vec<ResourceIdentifier> = Vec::new();
    converter
        .write(&mut w, Some(&empty), &mut RecordingContext::default())
        .unwrap();
    assert_eq!(w.into_value().unwrap(), json!({"data": []}));
}

#[test]
fn element_reads_are_lazy_and_single_pass() {
    let elements = CountingConverter::new(IdentifierConverter);
    let converter = ResourceListConverter::with_root_resolver(&elements, NestedOnly);

    let list = identifiers("tags", 4);
    let mut w = TokenWriter::default();
    converter.write(&mut w, Some(&list), &mut RecordingContext::default()).unwrap();
    assert_eq!(elements.writes(), 4);

    let mut r = reader(w.into_value().unwrap());
    let back: LinkedList<ResourceIdentifier> = converter.read(&mut r).unwrap();
    assert_eq!(back.len(), 4);
    assert_eq!(elements.reads(), 4, "each element is read exactly once");
    assert!(r.is_exhausted());
}

#[test]
fn element_failure_aborts_remaining_reads() {
    let elements = FailingConverter::new(1);
    let converter = ResourceListConverter::with_root_resolver(&elements, NestedOnly);

    let mut r = reader(json!({"data": identifiers_json(5)}));
    let result: Result<Vec<ResourceIdentifier>> = converter.read(&mut r);

    match result {
        Err(JsonApiError::Element { path, source }) => {
            assert_eq!(path, "/data/1");
            assert_eq!(source.to_string(), "injected element failure");
        }
        other => panic!("expected element failure, got {:?}", other),
    }
    assert_eq!(elements.reads(), 2, "no element after the failing one is read");
}

#[test]
fn missing_data_member_is_malformed() {
    let converter = ResourceListConverter::with_root_resolver(IdentifierConverter, NestedOnly);
    let mut r = reader(json!({"links": {"related": "/x"}, "meta": {}}));
    let result: Result<Vec<ResourceIdentifier>> = converter.read(&mut r);
    let err = result.unwrap_err();
    assert!(matches!(err, JsonApiError::MalformedDocument { .. }));
}

#[test]
fn document_without_data_is_malformed() {
    let converter = ResourceListConverter::new(IdentifierConverter);
    let mut r = reader(json!({"meta": {"total": 0}}));
    let result: Result<Vec<ResourceIdentifier>> = converter.read(&mut r);
    assert!(result.unwrap_err().is_malformed());
}

#[test]
fn truncated_token_stream_is_malformed() {
    let converter = ResourceListConverter::with_root_resolver(IdentifierConverter, NestedOnly);
    let mut r = reader(json!({"data": [{"type": "t", "id": "1"}]}));
    // consume the whole document so the converter runs out of tokens
    while !r.is_exhausted() {
        r.next_token().unwrap();
    }
    let result: Result<Vec<ResourceIdentifier>> = converter.read(&mut r);
    assert!(matches!(result, Err(JsonApiError::UnexpectedEnd { .. })));
}

#[test]
fn null_linkage_reads_as_empty_list() {
    let converter = ResourceListConverter::with_root_resolver(IdentifierConverter, NestedOnly);
    let mut r = reader(json!({"data": null, "links": {}}));
    let list: Vec<ResourceIdentifier> = converter.read(&mut r).unwrap();
    assert!(list.is_empty());
    assert!(r.is_exhausted());
}

#[test]
fn list_limit_is_enforced() {
    let converter = ResourceListConverter::with_root_resolver(IdentifierConverter, NestedOnly);
    let limits = Limits {
        max_list_len: 3,
        ..Limits::default()
    };
    let mut r = TokenReader::from_value(json!({"data": identifiers_json(4)}), limits).unwrap();
    let result: Result<Vec<ResourceIdentifier>> = converter.read(&mut r);
    assert!(matches!(result, Err(JsonApiError::LimitExceeded(_))));
}

#[test]
fn builds_any_list_type() {
    let converter = ResourceListConverter::new(IdentifierConverter);
    let doc = json!({"data": identifiers_json(3)});

    let small: SmallVec<[ResourceIdentifier; 2]> = converter.read(&mut reader(doc.clone())).unwrap();
    let boxed: Box<[ResourceIdentifier]> = converter.read(&mut reader(doc)).unwrap();
    assert_eq!(small.as_slice(), &*boxed);
    assert_eq!(boxed[2].id, "2");
}

#[test]
fn converter_is_shared_across_threads() {
    let converter = ResourceListConverter::new(IdentifierConverter);

    std::thread::scope(|scope| {
        for n in 0..4usize {
            let converter = &converter;
            scope.spawn(move || {
                let list = identifiers("tags", n + 1);
                let mut w = TokenWriter::default();
                converter
                    .write(&mut w, Some(&list), &mut RecordingContext::default())
                    .unwrap();
                let mut r = reader(w.into_value().unwrap());
                let back: Vec<ResourceIdentifier> = converter.read(&mut r).unwrap();
                assert_eq!(back, list);
            });
        }
    });
}

fn identifiers_json(count: usize) -> Value {
    serde_json::to_value(identifiers("tags", count)).unwrap()
}

// A resource object converter that places each member by probing it, the
// way a host framework uses the list converter.

#[derive(Debug, Clone, PartialEq)]
struct Article {
    id: String,
    title: String,
    keywords: Vec<String>,
    tags: Vec<ResourceIdentifier>,
    authors: Vec<ResourceIdentifier>,
}

impl jsonapi_codec::Describe for Article {
    fn shape() -> Shape {
        Shape::Resource("Article")
    }
}

struct ArticleConverter {
    linkage: ResourceListConverter<IdentifierConverter, NestedOnly>,
}

impl ArticleConverter {
    fn new() -> Self {
        Self {
            linkage: ResourceListConverter::with_root_resolver(IdentifierConverter, NestedOnly),
        }
    }

    fn probe_member(
        &self,
        write: impl FnOnce(&mut TokenWriter, &mut dyn WriteContext) -> Result<()>,
    ) -> Result<(Value, Classification)> {
        let mut scratch = TokenWriter::default();
        scratch.write_start_object()?;
        scratch.write_property_name("value")?;
        let mut probe = AttributeOrRelationshipProbe::new();
        write(&mut scratch, &mut probe)?;
        scratch.write_end_object()?;
        let mut value = scratch.into_value()?;
        let member = value["value"].take();
        Ok((member, probe.property_type()))
    }
}

impl ElementConverter for ArticleConverter {
    type Element = Article;

    fn can_convert(&self, shape: &Shape) -> bool {
        *shape == Shape::Resource("Article")
    }

    fn read(&self, reader: &mut TokenReader) -> Result<Article> {
        reader.expect(JsonToken::StartObject)?;
        let mut article = Article {
            id: String::new(),
            title: String::new(),
            keywords: Vec::new(),
            tags: Vec::new(),
            authors: Vec::new(),
        };
        loop {
            match reader.next_token()? {
                JsonToken::EndObject => break,
                JsonToken::PropertyName(name) => match name.as_str() {
                    "id" => article.id = reader.read_string()?,
                    "attributes" => {
                        let attributes = reader.read_value()?;
                        article.title = attributes["title"].as_str().unwrap_or_default().to_string();
                        article.keywords = serde_json::from_value(attributes["keywords"].clone())?;
                    }
                    "relationships" => {
                        reader.expect(JsonToken::StartObject)?;
                        loop {
                            match reader.next_token()? {
                                JsonToken::EndObject => break,
                                JsonToken::PropertyName(rel) if rel == "tags" => {
                                    article.tags = self.linkage.read(reader)?
                                }
                                JsonToken::PropertyName(rel) if rel == "authors" => {
                                    article.authors = self.linkage.read(reader)?
                                }
                                _ => reader.skip_value()?,
                            }
                        }
                    }
                    _ => reader.skip_value()?,
                },
                other => {
                    return Err(JsonApiError::malformed(
                        reader.path().to_string(),
                        other.kind(),
                    ))
                }
            }
        }
        Ok(article)
    }

    fn write(
        &self,
        writer: &mut TokenWriter,
        value: &Article,
        _ctx: &mut dyn WriteContext,
    ) -> Result<()> {
        let mut attributes = Map::new();
        let mut relationships = Map::new();
        let mut place = |name: &str, (member, kind): (Value, Classification)| {
            let section = match kind {
                Classification::Attribute => &mut attributes,
                Classification::Relationship => &mut relationships,
            };
            section.insert(name.to_string(), member);
        };

        place(
            "title",
            self.probe_member(|w, _| w.write_value(json!(value.title)))?,
        );
        place(
            "keywords",
            self.probe_member(|w, _| w.write_value(json!(value.keywords)))?,
        );
        place(
            "tags",
            self.probe_member(|w, ctx| self.linkage.write(w, Some(&value.tags), ctx))?,
        );
        place(
            "authors",
            self.probe_member(|w, ctx| self.linkage.write(w, Some(&value.authors), ctx))?,
        );

        writer.write_start_object()?;
        writer.write_member("type", json!("articles"))?;
        writer.write_member("id", json!(value.id))?;
        writer.write_member("attributes", Value::Object(attributes))?;
        writer.write_member("relationships", Value::Object(relationships))?;
        writer.write_end_object()
    }
}

#[test]
fn probe_places_list_members_under_relationships() {
    init_tracing();
    let articles = ResourceListConverter::new(ArticleConverter::new());
    let list = vec![Article {
        id: "1".to_string(),
        title: "Rust".to_string(),
        keywords: vec!["systems".to_string(), "safety".to_string()],
        tags: identifiers("tags", 2),
        authors: Vec::new(),
    }];

    let mut w = TokenWriter::default();
    articles
        .write(&mut w, Some(&list), &mut AttributeOrRelationshipProbe::new())
        .unwrap();
    let doc = w.into_value().unwrap();

    assert_eq!(doc["data"][0]["attributes"]["keywords"], json!(["systems", "safety"]));
    assert_eq!(
        doc["data"][0]["relationships"]["tags"]["data"][1],
        json!({"type": "tags", "id": "1"})
    );
    assert_eq!(doc["data"][0]["relationships"]["authors"], json!({"data": []}));

    let back: Vec<Article> = articles.read(&mut reader(doc)).unwrap();
    assert_eq!(back, list);
}

#[test]
fn reads_relationships_from_fixture_documents() {
    let tags = identifiers("tags", 3);
    let resource = DocumentBuilder::resource("articles", "7")
        .attribute("title", json!("Fixtures"))
        .attribute("keywords", json!([]))
        .to_many("tags", &tags)
        .build();

    let articles = ResourceListConverter::new(ArticleConverter::new());
    let back: Vec<Article> = articles
        .read(&mut reader(json!({"data": [resource], "included": []})))
        .unwrap();

    assert_eq!(back[0].id, "7");
    assert_eq!(back[0].tags, tags);
    assert!(back[0].authors.is_empty());
}

#[test]
fn single_resource_primary_data_is_not_a_list() {
    let document = DocumentBuilder::resource("articles", "7")
        .attribute("title", json!("Alone"))
        .into_document();
    assert!(document["data"].is_object());

    let articles = ResourceListConverter::new(ArticleConverter::new());
    let result: Result<Vec<Article>> = articles.read(&mut reader(document));
    match result {
        Err(JsonApiError::MalformedDocument { path, reason }) => {
            assert_eq!(path, "/data");
            assert!(reason.contains("expected array"), "{}", reason);
        }
        other => panic!("expected malformed document, got {:?}", other),
    }
}

#[test]
fn applicability_rejects_attribute_lists() {
    let converter = ResourceListConverter::new(ArticleConverter::new());
    assert!(converter.can_convert(&Shape::List(Box::new(Shape::Resource("Article")))));
    assert!(!converter.can_convert(&<Vec<String> as jsonapi_codec::Describe>::shape()));
    assert!(!converter.can_convert(&Shape::Resource("Article")));
}
