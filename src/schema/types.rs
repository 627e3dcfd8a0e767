//! Core schema type definitions.
//!
//! The schema catalog describes, per object class kind, which attributes
//! exist and whether each one is single- or multi-valued.

use crate::model::{AttrValue, ObjectClassKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether an attribute holds one value or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    Single,
    Multi,
}

/// Data types an attribute may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeDataType {
    #[default]
    String,
    Integer,
    Boolean,
    Binary,
    /// RFC 3339 timestamp carried as a string
    DateTime,
}

impl AttributeDataType {
    /// Check whether a value is acceptable for this data type.
    pub fn accepts(self, value: &AttrValue) -> bool {
        match (self, value) {
            (AttributeDataType::String, AttrValue::String(_)) => true,
            (AttributeDataType::Integer, AttrValue::Integer(_)) => true,
            (AttributeDataType::Boolean, AttrValue::Boolean(_)) => true,
            (AttributeDataType::Binary, AttrValue::Binary(_)) => true,
            (AttributeDataType::DateTime, AttrValue::String(s)) => {
                chrono::DateTime::parse_from_rfc3339(s).is_ok()
            }
            _ => false,
        }
    }
}

/// Attribute mutability characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Managed by the directory, never written by the host
    ReadOnly,
    #[default]
    ReadWrite,
    /// Set on create, never modified afterwards
    Immutable,
    /// Accepted on writes, never returned (passwords)
    WriteOnly,
}

/// Definition of one attribute of an object class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: AttributeDataType,
    pub cardinality: Cardinality,
    pub required: bool,
    pub mutability: Mutability,
}

impl AttributeInfo {
    /// Single-valued, optional, read-write attribute.
    pub fn new(name: impl Into<String>, data_type: AttributeDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            cardinality: Cardinality::Single,
            required: false,
            mutability: Mutability::ReadWrite,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeDataType::String)
    }

    pub fn multi_valued(mut self) -> Self {
        self.cardinality = Cardinality::Multi;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    pub fn is_multi_valued(&self) -> bool {
        self.cardinality == Cardinality::Multi
    }

    pub fn is_creatable(&self) -> bool {
        matches!(
            self.mutability,
            Mutability::ReadWrite | Mutability::Immutable | Mutability::WriteOnly
        )
    }

    pub fn is_updatable(&self) -> bool {
        matches!(self.mutability, Mutability::ReadWrite | Mutability::WriteOnly)
    }

    pub fn is_readable(&self) -> bool {
        self.mutability != Mutability::WriteOnly
    }
}

/// Attribute catalog of a single object class kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectClassInfo {
    pub kind: ObjectClassKind,
    pub attributes: Vec<AttributeInfo>,
}

impl ObjectClassInfo {
    pub fn new(kind: ObjectClassKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute append.
    pub fn with_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Host-facing object class name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn find_attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// False when the attribute is absent from the catalog.
    pub fn is_multi_valued(&self, name: &str) -> bool {
        self.find_attribute(name)
            .is_some_and(AttributeInfo::is_multi_valued)
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeInfo> {
        self.attributes.iter().filter(|attribute| attribute.required)
    }
}

/// Complete, immutable schema catalog for every supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    object_classes: BTreeMap<ObjectClassKind, ObjectClassInfo>,
}

impl SchemaDescription {
    pub(super) fn from_object_classes(
        object_classes: BTreeMap<ObjectClassKind, ObjectClassInfo>,
    ) -> Self {
        Self { object_classes }
    }

    pub fn object_class(&self, kind: ObjectClassKind) -> Option<&ObjectClassInfo> {
        self.object_classes.get(&kind)
    }

    /// Find an object class by its host-facing name.
    pub fn find_object_class_info(&self, name: &str) -> Option<&ObjectClassInfo> {
        ObjectClassKind::from_name(name).and_then(|kind| self.object_class(kind))
    }

    pub fn object_classes(&self) -> impl Iterator<Item = &ObjectClassInfo> {
        self.object_classes.values()
    }

    /// False when the attribute or the kind is absent from the catalog.
    pub fn is_multi_valued(&self, kind: ObjectClassKind, attribute: &str) -> bool {
        self.object_class(kind)
            .is_some_and(|info| info.is_multi_valued(attribute))
    }
}
