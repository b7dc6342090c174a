#![deny(missing_docs)]

//! # Response Resolver
//!
//! Converts raw JSON:API resource objects into plain models by walking the
//! registered schema's field map and attaching `hasOne`/`hasMany`
//! relationships from the document's `included` side-list.
//!
//! Resolution is synchronous and purely functional over its inputs: the
//! registry is only read, no shim is mutated, and every call resolves from
//! scratch. Related resources are themselves resolved recursively, so a
//! relationship chain materializes as deep as `included` actually nests it.

use crate::document::{Document, Linkage, PrimaryData, ResourceIdentifier, ResourceObject};
use crate::error::{AppError, AppResult};
use crate::models::{AttributeSpec, Model, RelationshipKind, RelationshipSpec};
use crate::registry::ModelRegistry;
use serde_json::{Map, Value};

/// Resolved primary data of a whole document.
#[derive(Debug, Clone, PartialEq)]
pub enum DeserializedData {
    /// A single primary resource.
    One(Model),
    /// A primary collection, input order preserved.
    Many(Vec<Model>),
}

/// Resolves raw JSON:API resources into plain models.
///
/// Borrows a read-only registry plus the injected singularization function
/// (applied to every resource `type` before schema lookup); construction is
/// cheap and a resolver is reusable across documents and callers.
pub struct Resolver<'a> {
    registry: &'a ModelRegistry,
    singularize: &'a dyn Fn(&str) -> String,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver bound to a registry and a singularization function.
    pub fn new(registry: &'a ModelRegistry, singularize: &'a dyn Fn(&str) -> String) -> Self {
        Self {
            registry,
            singularize,
        }
    }

    /// Deserializes a whole response document.
    ///
    /// Dispatches on the shape of `data`: a single resource yields
    /// [`DeserializedData::One`], a collection yields
    /// [`DeserializedData::Many`], and `null`/absent data yields `None`.
    pub fn deserialize_document(
        &self,
        doc: &Document,
        response_model: Option<&str>,
    ) -> AppResult<Option<DeserializedData>> {
        let included = doc.included.as_deref().unwrap_or(&[]);
        match &doc.data {
            None => Ok(None),
            Some(PrimaryData::One(item)) => Ok(Some(DeserializedData::One(
                self.deserialize_resource(item, included, response_model)?,
            ))),
            Some(PrimaryData::Many(items)) => Ok(Some(DeserializedData::Many(
                self.deserialize_collection(items, included, response_model)?,
            ))),
        }
    }

    /// Deserializes an ordered collection of resources.
    ///
    /// Each item is resolved independently; output order matches input order
    /// and no deduplication is performed. The first schema miss aborts the
    /// whole collection.
    pub fn deserialize_collection(
        &self,
        items: &[ResourceObject],
        included: &[ResourceObject],
        response_model: Option<&str>,
    ) -> AppResult<Vec<Model>> {
        self.deserialize_each(items, included, response_model)
    }

    /// Deserializes a single resource against its registered schema.
    ///
    /// The resource's `type` is singularized and looked up in the registry;
    /// `response_model` is informational only and appears in the error when
    /// the lookup fails. A schema-level custom deserializer, when present,
    /// replaces the walk entirely and receives only the raw item.
    pub fn deserialize_resource(
        &self,
        item: &ResourceObject,
        included: &[ResourceObject],
        response_model: Option<&str>,
    ) -> AppResult<Model> {
        let singular = (self.singularize)(&item.resource_type);
        let schema = self.registry.model_for(&singular).ok_or_else(|| {
            AppError::SchemaNotFound(
                item.resource_type.clone(),
                response_model.unwrap_or("unknown").to_string(),
            )
        })?;

        if let Some(deserializer) = &schema.deserializer {
            return Ok(deserializer(item));
        }

        let mut model = Model::new();
        if let Some(id) = item.id.as_deref() {
            if !id.is_empty() {
                model.insert("id".to_string(), Value::String(id.to_string()));
            }
        }

        for (key, spec) in &schema.attributes {
            let value = match spec {
                AttributeSpec::Relationship(rel) => {
                    self.attach_relationship(rel, item, included, key)?
                }
                // Pass-through copy; an absent source attribute stays null.
                AttributeSpec::Plain => item
                    .attributes
                    .as_ref()
                    .and_then(|attrs| attrs.get(key))
                    .cloned()
                    .unwrap_or(Value::Null),
            };
            model.insert(key.clone(), value);
        }

        for (key, value) in [("meta", &item.meta), ("links", &item.links)] {
            if let Some(value) = value {
                if is_truthy(value) {
                    model.insert(key.to_string(), value.clone());
                }
            }
        }

        Ok(model)
    }

    fn deserialize_each<'i, I>(
        &self,
        items: I,
        included: &[ResourceObject],
        response_model: Option<&str>,
    ) -> AppResult<Vec<Model>>
    where
        I: IntoIterator<Item = &'i ResourceObject>,
    {
        items
            .into_iter()
            .map(|item| self.deserialize_resource(item, included, response_model))
            .collect()
    }

    fn attach_relationship(
        &self,
        spec: &RelationshipSpec,
        item: &ResourceObject,
        included: &[ResourceObject],
        key: &str,
    ) -> AppResult<Value> {
        match spec.kind {
            RelationshipKind::HasOne => self.attach_has_one(spec, item, included, key),
            RelationshipKind::HasMany => self.attach_has_many(spec, item, included, key),
        }
    }

    /// To-one: the first match in `included`-list order wins; anything else
    /// resolves to null. The recursive call carries no response-model name.
    fn attach_has_one(
        &self,
        spec: &RelationshipSpec,
        item: &ResourceObject,
        included: &[ResourceObject],
        key: &str,
    ) -> AppResult<Value> {
        if item.relationships.is_none() {
            return Ok(Value::Null);
        }
        let related = related_items_for(spec, item, included, key);
        match related.first() {
            Some(first) => Ok(Value::Object(
                self.deserialize_resource(first, included, None)?,
            )),
            None => Ok(Value::Null),
        }
    }

    /// To-many: a located list resolves through the collection path; an empty
    /// one yields an empty array, not null.
    fn attach_has_many(
        &self,
        spec: &RelationshipSpec,
        item: &ResourceObject,
        included: &[ResourceObject],
        key: &str,
    ) -> AppResult<Value> {
        if item.relationships.is_none() {
            return Ok(Value::Null);
        }
        let related = related_items_for(spec, item, included, key);
        if related.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        let models = self.deserialize_each(related, included, None)?;
        Ok(Value::Array(models.into_iter().map(Value::Object).collect()))
    }
}

/// Collects the full resource objects in `included` matching the linkage
/// under `key`, in (reference, then scan) order. Duplicate matches are all
/// returned; missing or null linkage yields an empty list.
fn related_items_for<'i>(
    spec: &RelationshipSpec,
    item: &ResourceObject,
    included: &'i [ResourceObject],
    key: &str,
) -> Vec<&'i ResourceObject> {
    let linkage = item
        .relationships
        .as_ref()
        .and_then(|rels| rels.get(key))
        .and_then(|rel| rel.data.as_ref());

    match linkage {
        None => Vec::new(),
        Some(Linkage::One(reference)) => included
            .iter()
            .filter(|candidate| is_related_match(spec, candidate, reference))
            .collect(),
        Some(Linkage::Many(references)) => references
            .iter()
            .flat_map(|reference| {
                included
                    .iter()
                    .filter(move |candidate| is_related_match(spec, candidate, reference))
            })
            .collect(),
    }
}

/// Match rule: id and type must equal the reference, and the candidate must
/// satisfy the relationship's attribute filter when one is declared.
fn is_related_match(
    spec: &RelationshipSpec,
    candidate: &ResourceObject,
    reference: &ResourceIdentifier,
) -> bool {
    let passes_filter = match &spec.filter {
        Some(filter) => matches_attributes(candidate.attributes.as_ref(), filter),
        None => true,
    };
    candidate.id.as_deref() == Some(reference.id.as_str())
        && candidate.resource_type == reference.resource_type
        && passes_filter
}

/// Every filter key must be present in the attributes with a deep-equal
/// value (`serde_json::Value` equality).
fn matches_attributes(attributes: Option<&Map<String, Value>>, filter: &Map<String, Value>) -> bool {
    let Some(attributes) = attributes else {
        return filter.is_empty();
    };
    filter
        .iter()
        .all(|(key, expected)| attributes.get(key) == Some(expected))
}

/// JavaScript-style truthiness over JSON values, used for the `meta`/`links`
/// copy-through check.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
