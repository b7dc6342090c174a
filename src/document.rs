#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to JSON:API wire objects; unknown members are
//! ignored rather than rejected. Resolution logic never mutates them — they
//! are decoded once per response and borrowed throughout.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resource identifier: the minimal `{id, type}` reference used inside
/// `relationships.*.data`, as opposed to a full resource object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResourceIdentifier {
    /// Resource id.
    pub id: String,
    /// Resource type (wire name, usually plural).
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Linkage data of a relationship: a single reference or an array of them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Linkage {
    /// To-one linkage.
    One(ResourceIdentifier),
    /// To-many linkage (possibly empty).
    Many(Vec<ResourceIdentifier>),
}

/// A relationship object attached to a resource under a relationship key.
///
/// `data: null` decodes to `None`, which resolution treats the same as an
/// absent `data` member.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RelationshipObject {
    /// Resource linkage.
    #[serde(default)]
    pub data: Option<Linkage>,
    /// Relationship-level links. Not consulted during resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    /// Relationship-level meta. Not consulted during resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A full JSON:API resource object as received over the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResourceObject {
    /// Resource id. Optional on the wire (e.g. client-generated resources).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource type (wire name, usually plural).
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Plain attribute values keyed by field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    /// Relationship objects keyed by relationship name, document order kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, RelationshipObject>>,
    /// Resource-level meta, copied through to the model when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Resource-level links, copied through to the model when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl ResourceObject {
    /// Decodes a resource object from a raw JSON value.
    pub fn from_value(value: Value) -> AppResult<Self> {
        serde_json::from_value(value).map_err(AppError::Parse)
    }
}

/// Primary data of a document: one resource or an ordered collection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A single primary resource.
    One(ResourceObject),
    /// A resource collection.
    Many(Vec<ResourceObject>),
}

/// A top-level JSON:API response document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Document {
    /// Primary data; `null` and absent both decode to `None`.
    #[serde(default)]
    pub data: Option<PrimaryData>,
    /// Side-list of full resource objects referenced by relationships.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
    /// Document-level meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Document-level links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl Document {
    /// Decodes a whole response document from a raw JSON value.
    pub fn from_value(value: Value) -> AppResult<Self> {
        serde_json::from_value(value).map_err(AppError::Parse)
    }
}
