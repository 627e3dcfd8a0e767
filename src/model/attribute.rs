//! Attribute values and attribute sets.
//!
//! Values inside an attribute keep the order the host gave them. The set
//! itself is keyed by attribute name and has no ordering guarantee.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

/// A single opaque attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    /// Raw bytes, carried as standard base64 in JSON
    Binary(#[serde(with = "base64_bytes")] Vec<u8>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AttrValue::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "string",
            AttrValue::Integer(_) => "integer",
            AttrValue::Boolean(_) => "boolean",
            AttrValue::Binary(_) => "binary",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => f.write_str(s),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Binary(bytes) => f.write_str(&STANDARD.encode(bytes)),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Boolean(value)
    }
}

impl From<Vec<u8>> for AttrValue {
    fn from(value: Vec<u8>) -> Self {
        AttrValue::Binary(value)
    }
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// A named attribute with an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    values: Vec<AttrValue>,
}

impl Attribute {
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Attribute with a single value.
    pub fn single(name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Attribute with no values, used to clear an attribute.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[AttrValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<AttrValue> {
        self.values
    }

    /// The first value, if any.
    pub fn first(&self) -> Option<&AttrValue> {
        self.values.first()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Mapping from attribute name to attribute. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attributes: HashMap<String, Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing any attribute of the same name.
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.attributes
            .insert(attribute.name().to_string(), attribute)
    }

    /// Builder-style insert.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.insert(attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// First value of a string attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|attribute| attribute.first())
            .and_then(AttrValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Keep only the attributes whose names are listed.
    pub fn retain_names(&mut self, names: &[String]) {
        self.attributes
            .retain(|name, _| names.iter().any(|wanted| wanted == name));
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut set = AttributeSet::new();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

impl IntoIterator for AttributeSet {
    type Item = Attribute;
    type IntoIter = hash_map::IntoValues<String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.into_values()
    }
}
