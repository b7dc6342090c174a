#![deny(missing_docs)]

//! # JSON:API Core
//!
//! Deserialization core for a JSON:API client: converts response documents
//! into plain model objects, resolving `hasOne`/`hasMany` relationships
//! against the document's `included` side-list and a registry of model
//! schemas.
//!
//! The crate performs no I/O and keeps no cross-call state; transport,
//! request building, and type-name singularization belong to the caller
//! (the latter is injected as a plain function).
//!
//! ```
//! use jsonapi_core::{Document, ModelRegistry, ModelSchema, Resolver};
//!
//! let mut registry = ModelRegistry::new();
//! registry.register(ModelSchema::new("article").attr("title").has_one("author"));
//! registry.register(ModelSchema::new("person").attr("name"));
//!
//! let singular = |name: &str| name.trim_end_matches('s').to_string();
//! let resolver = Resolver::new(&registry, &singular);
//!
//! let doc = Document::from_value(serde_json::json!({
//!     "data": {
//!         "id": "1", "type": "articles",
//!         "attributes": { "title": "JSON:API paints my bikeshed" },
//!         "relationships": { "author": { "data": { "id": "9", "type": "persons" } } }
//!     },
//!     "included": [
//!         { "id": "9", "type": "persons", "attributes": { "name": "Dan" } }
//!     ]
//! })).unwrap();
//!
//! let resolved = resolver.deserialize_document(&doc, Some("article")).unwrap();
//! assert!(resolved.is_some());
//! ```

/// Shared error types.
pub mod error;

/// Wire-facing document shims.
pub mod document;

/// Model schema definitions.
pub mod models;

/// Model schema registry.
pub mod registry;

/// Relationship-resolving response deserializer.
pub mod resolver;

pub use document::{
    Document, Linkage, PrimaryData, RelationshipObject, ResourceIdentifier, ResourceObject,
};
pub use error::{AppError, AppResult};
pub use models::{
    AttributeSpec, CustomDeserializer, Model, ModelSchema, RelationshipKind, RelationshipSpec,
};
pub use registry::ModelRegistry;
pub use resolver::{DeserializedData, Resolver};
