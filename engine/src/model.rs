//! Models: the records a [`crate::Store`] persists.
//!
//! The engine only touches a model's identifier and its serialized form.
//! Anything implementing [`Model`] can be stored; [`Document`] is a
//! general-purpose model holding a JSON attribute map.

use crate::error::Result;
use crate::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute name under which the identifier is mirrored into the attributes.
pub const ID_ATTRIBUTE: &str = "id";

/// Capability required of anything the engine persists.
pub trait Model {
    /// The model's identifier, if it has been assigned one.
    fn id(&self) -> Option<&str>;

    /// Assign the identifier. Implementations must also record it in the
    /// attribute set so it is part of the serialized body.
    fn set_id(&mut self, id: RecordId);

    /// Serialize the model's attributes to the string stored under its key.
    fn to_json(&self) -> Result<String>;
}

/// A model made of a JSON attribute map and an optional identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, `None` until first persisted
    pub id: Option<RecordId>,
    /// Attribute set, serialized as the record body
    pub attributes: Map<String, Value>,
}

impl Document {
    /// Create an unsaved document from an attribute object.
    ///
    /// Non-object values produce an empty attribute set. An `id` attribute
    /// that is a non-empty string or a number becomes the document's
    /// identifier; the attribute itself is kept as written.
    pub fn new(attributes: Value) -> Self {
        let attributes = match attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = attributes.get(ID_ATTRIBUTE).and_then(id_from_value);
        Self { id, attributes }
    }

    /// Create a document with a known identifier. An empty id leaves the
    /// document unidentified.
    pub fn with_id(id: impl Into<RecordId>, attributes: Value) -> Self {
        let mut doc = Self::new(attributes);
        let id = id.into();
        if !id.is_empty() {
            doc.set_id(id);
        }
        doc
    }

    /// Parse a stored body back into a document.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// Read an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set an attribute. Setting `id` to a usable value also changes the
    /// identifier.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if name == ID_ATTRIBUTE {
            if let Some(id) = id_from_value(&value) {
                self.id = Some(id);
            }
        }
        self.attributes.insert(name, value);
    }
}

/// Identifier carried by an `id` attribute value. Numbers use their JSON
/// form, so `5` and `"5"` name the same record.
fn id_from_value(value: &Value) -> Option<RecordId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Model for Document {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.attributes
            .insert(ID_ATTRIBUTE.to_string(), Value::String(id.clone()));
        self.id = Some(id);
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.attributes)?)
    }
}
