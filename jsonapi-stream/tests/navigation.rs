//! Integration tests for reading and writing through the navigator

use jsonapi_stream::navigator::{enter_read, enter_write, exit_read, exit_write, iterate_array};
use jsonapi_stream::{JsonToken, Limits, Result, TokenReader, TokenWriter};
use proptest::prelude::*;
use serde_json::{json, Value};

fn relationship_doc(items: &[i64]) -> Value {
    json!({
        "type": "articles",
        "relationships": {
            "tags": {"links": {"related": "/tags"}, "data": items, "meta": {}},
            "author": {"data": null}
        },
        "id": "1"
    })
}

#[test]
fn nested_relationship_read_resumes_enclosing_stream() {
    let mut r = TokenReader::from_value(relationship_doc(&[3, 1, 2]), Limits::default()).unwrap();
    r.expect(JsonToken::StartObject).unwrap();
    r.next_token().unwrap();
    r.skip_value().unwrap();
    r.next_token().unwrap(); // relationships
    r.expect(JsonToken::StartObject).unwrap();
    assert_eq!(
        r.next_token().unwrap(),
        JsonToken::PropertyName("tags".to_string())
    );

    let marker = enter_read(&mut r, "data").unwrap();
    let tags: Vec<Value> = iterate_array(&mut r, |r| r.read_value())
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    exit_read(&mut r, marker).unwrap();
    assert_eq!(tags, vec![json!(3), json!(1), json!(2)]);

    assert_eq!(
        r.next_token().unwrap(),
        JsonToken::PropertyName("author".to_string())
    );
    assert_eq!(r.path().to_string(), "/relationships/author");
    r.skip_value().unwrap();
    r.expect(JsonToken::EndObject).unwrap();
    r.next_token().unwrap(); // id
    assert_eq!(r.read_string().unwrap(), "1");
    r.expect(JsonToken::EndObject).unwrap();
    assert!(r.is_exhausted());
}

proptest! {
    #[test]
    fn array_order_survives_write_then_read(items in prop::collection::vec(any::<i64>(), 0..50)) {
        let mut w = TokenWriter::default();
        let marker = enter_write(&mut w, "data").unwrap();
        w.write_start_array().unwrap();
        for item in &items {
            w.write_value(json!(item)).unwrap();
        }
        w.write_end_array().unwrap();
        exit_write(&mut w, marker).unwrap();
        let doc = w.into_value().unwrap();

        let mut r = TokenReader::from_value(doc, Limits::default()).unwrap();
        let marker = enter_read(&mut r, "data").unwrap();
        let read: Vec<i64> = iterate_array(&mut r, |r| {
            Ok(r.read_value()?.as_i64().unwrap_or_default())
        })
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
        exit_read(&mut r, marker).unwrap();

        prop_assert_eq!(read, items);
    }
}
