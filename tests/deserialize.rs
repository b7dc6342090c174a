use jsonapi_core::{
    AppError, DeserializedData, Document, ModelRegistry, ModelSchema, RelationshipSpec, Resolver,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn singular(name: &str) -> String {
    match name {
        "people" => "person".to_string(),
        other => other.strip_suffix('s').unwrap_or(other).to_string(),
    }
}

fn blog_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register(
        ModelSchema::new("article")
            .attr("title")
            .has_one("author")
            .has_many("comments"),
    );
    registry.register(
        ModelSchema::new("comment")
            .attr("body")
            .has_one("author"),
    );
    registry.register(ModelSchema::new("person").attr("name"));
    registry
}

#[test]
fn test_single_resource_document_with_nested_relationships() {
    let doc = Document::from_value(json!({
        "data": {
            "id": "1",
            "type": "articles",
            "attributes": { "title": "JSON:API paints my bikeshed" },
            "relationships": {
                "author": { "data": { "id": "9", "type": "people" } },
                "comments": {
                    "data": [
                        { "id": "5", "type": "comments" },
                        { "id": "12", "type": "comments" }
                    ]
                }
            },
            "links": { "self": "http://example.com/articles/1" }
        },
        "included": [
            { "id": "9", "type": "people", "attributes": { "name": "Dan Gebhardt" } },
            {
                "id": "5",
                "type": "comments",
                "attributes": { "body": "First!" },
                "relationships": {
                    "author": { "data": { "id": "2", "type": "people" } }
                }
            },
            {
                "id": "12",
                "type": "comments",
                "attributes": { "body": "I like XML better" },
                "relationships": {
                    "author": { "data": { "id": "9", "type": "people" } }
                }
            },
            { "id": "2", "type": "people", "attributes": { "name": "Anonymous" } }
        ]
    }))
    .unwrap();

    let registry = blog_registry();
    let resolver = Resolver::new(&registry, &singular);
    let resolved = resolver
        .deserialize_document(&doc, Some("article"))
        .unwrap();

    let model = match resolved {
        Some(DeserializedData::One(model)) => model,
        other => panic!("expected a single model, got {:?}", other),
    };

    assert_eq!(
        Value::Object(model),
        json!({
            "id": "1",
            "title": "JSON:API paints my bikeshed",
            "author": { "id": "9", "name": "Dan Gebhardt" },
            "comments": [
                {
                    "id": "5",
                    "body": "First!",
                    "author": { "id": "2", "name": "Anonymous" }
                },
                {
                    "id": "12",
                    "body": "I like XML better",
                    "author": { "id": "9", "name": "Dan Gebhardt" }
                }
            ],
            "links": { "self": "http://example.com/articles/1" }
        })
    );
}

#[test]
fn test_collection_document_preserves_order() {
    let doc = Document::from_value(json!({
        "data": [
            { "id": "3", "type": "articles", "attributes": { "title": "third" } },
            { "id": "1", "type": "articles", "attributes": { "title": "first" } },
            { "id": "2", "type": "articles", "attributes": { "title": "second" } }
        ]
    }))
    .unwrap();

    let registry = blog_registry();
    let resolver = Resolver::new(&registry, &singular);
    let resolved = resolver
        .deserialize_document(&doc, Some("article"))
        .unwrap();

    let models = match resolved {
        Some(DeserializedData::Many(models)) => models,
        other => panic!("expected a collection, got {:?}", other),
    };

    assert_eq!(models.len(), 3);
    let ids: Vec<&Value> = models.iter().map(|m| &m["id"]).collect();
    assert_eq!(ids, [&json!("3"), &json!("1"), &json!("2")]);
}

#[test]
fn test_null_data_document_resolves_to_none() {
    let doc = Document::from_value(json!({ "data": null })).unwrap();

    let registry = blog_registry();
    let resolver = Resolver::new(&registry, &singular);
    let resolved = resolver.deserialize_document(&doc, Some("article")).unwrap();

    assert_eq!(resolved, None);
}

#[test]
fn test_filtered_relationship_excludes_non_matching_included() {
    let filter = match json!({ "status": "approved" }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };

    let mut registry = ModelRegistry::new();
    registry.register(
        ModelSchema::new("article")
            .attr("title")
            .relationship("comments", RelationshipSpec::has_many().filtered(filter)),
    );
    registry.register(ModelSchema::new("comment").attr("body").attr("status"));

    let doc = Document::from_value(json!({
        "data": {
            "id": "1",
            "type": "articles",
            "attributes": { "title": "moderated" },
            "relationships": {
                "comments": {
                    "data": [
                        { "id": "5", "type": "comments" },
                        { "id": "6", "type": "comments" }
                    ]
                }
            }
        },
        "included": [
            { "id": "5", "type": "comments", "attributes": { "body": "fine", "status": "approved" } },
            { "id": "6", "type": "comments", "attributes": { "body": "buy pills", "status": "spam" } }
        ]
    }))
    .unwrap();

    let resolver = Resolver::new(&registry, &singular);
    let resolved = resolver
        .deserialize_document(&doc, Some("article"))
        .unwrap();

    let model = match resolved {
        Some(DeserializedData::One(model)) => model,
        other => panic!("expected a single model, got {:?}", other),
    };
    assert_eq!(
        model["comments"],
        json!([{ "id": "5", "body": "fine", "status": "approved" }])
    );
}

#[test]
fn test_unregistered_type_aborts_the_whole_document() {
    let doc = Document::from_value(json!({
        "data": [
            { "id": "1", "type": "articles", "attributes": { "title": "ok" } },
            { "id": "2", "type": "unknowns" }
        ]
    }))
    .unwrap();

    let registry = blog_registry();
    let resolver = Resolver::new(&registry, &singular);
    let err = resolver
        .deserialize_document(&doc, Some("article"))
        .unwrap_err();

    match err {
        AppError::SchemaNotFound(got, expected) => {
            assert_eq!(got, "unknowns");
            assert_eq!(expected, "article");
        }
        other => panic!("expected SchemaNotFound, got {:?}", other),
    }
}
