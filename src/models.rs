#![deny(missing_docs)]

//! # Model Schemas
//!
//! Definition structures for registered models: the field map a resource is
//! deserialized against, and the relationship descriptors that drive
//! resolution against a document's `included` list.
//!
//! Note: `ModelSchema` does not derive `Debug` or `PartialEq` because the
//! optional custom deserializer is an opaque function.

use crate::document::ResourceObject;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A deserialized model: a plain JSON object mapping field keys to values.
///
/// Key order follows the schema's field declaration order (`id` first when
/// present, `meta`/`links` last when present).
pub type Model = Map<String, Value>;

/// A replacement deserializer attached to a schema.
///
/// When present it receives the raw resource object and its result is
/// returned verbatim; the schema's field map and the `included` list are
/// never consulted.
pub type CustomDeserializer = Box<dyn Fn(&ResourceObject) -> Model + Send + Sync>;

/// Relationship cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    /// Resolution yields a single model (or null).
    HasOne,
    /// Resolution yields an ordered sequence of models.
    HasMany,
}

/// Descriptor for a relationship field.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipSpec {
    /// Cardinality of the relationship.
    pub kind: RelationshipKind,
    /// Optional attribute filter: a related resource only matches when every
    /// key here is present in its attributes with a deep-equal value.
    pub filter: Option<Map<String, Value>>,
}

impl RelationshipSpec {
    /// A to-one relationship with no filter.
    pub fn has_one() -> Self {
        Self {
            kind: RelationshipKind::HasOne,
            filter: None,
        }
    }

    /// A to-many relationship with no filter.
    pub fn has_many() -> Self {
        Self {
            kind: RelationshipKind::HasMany,
            filter: None,
        }
    }

    /// Attaches an attribute filter to the relationship.
    pub fn filtered(mut self, filter: Map<String, Value>) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A field declaration in a schema: either a plain attribute copied verbatim
/// from the resource's `attributes`, or a relationship resolved against the
/// `included` list.
pub enum AttributeSpec {
    /// Plain attribute, pass-through copy.
    Plain,
    /// Relationship, resolved per its descriptor.
    Relationship(RelationshipSpec),
}

/// A registered model definition.
///
/// Built with the chained declaration methods; field order is preserved and
/// drives the key order of deserialized models.
pub struct ModelSchema {
    /// Model name, matched against singularized resource types.
    pub name: String,
    /// Field map in declaration order.
    pub attributes: IndexMap<String, AttributeSpec>,
    /// Optional replacement deserializer.
    pub deserializer: Option<CustomDeserializer>,
}

impl ModelSchema {
    /// Creates an empty schema for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            deserializer: None,
        }
    }

    /// Declares a plain attribute field.
    pub fn attr(mut self, key: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), AttributeSpec::Plain);
        self
    }

    /// Declares an unfiltered to-one relationship field.
    pub fn has_one(self, key: impl Into<String>) -> Self {
        self.relationship(key, RelationshipSpec::has_one())
    }

    /// Declares an unfiltered to-many relationship field.
    pub fn has_many(self, key: impl Into<String>) -> Self {
        self.relationship(key, RelationshipSpec::has_many())
    }

    /// Declares a relationship field from a full descriptor.
    pub fn relationship(mut self, key: impl Into<String>, spec: RelationshipSpec) -> Self {
        self.attributes
            .insert(key.into(), AttributeSpec::Relationship(spec));
        self
    }

    /// Attaches a custom deserializer, bypassing the field map entirely.
    pub fn deserialize_with<F>(mut self, deserializer: F) -> Self
    where
        F: Fn(&ResourceObject) -> Model + Send + Sync + 'static,
    {
        self.deserializer = Some(Box::new(deserializer));
        self
    }
}
