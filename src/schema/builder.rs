//! Collects object class definitions contributed by the entity processors.

use super::types::{ObjectClassInfo, SchemaDescription};
use crate::error::{ConnectorError, ConnectorResult};
use crate::model::ObjectClassKind;
use std::collections::{BTreeMap, HashSet};

/// Mutable accumulator for a [`SchemaDescription`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    object_classes: BTreeMap<ObjectClassKind, ObjectClassInfo>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the catalog of one object class kind.
    ///
    /// Each kind may be defined once, and attribute names must be unique
    /// within the kind.
    pub fn define_object_class(&mut self, info: ObjectClassInfo) -> ConnectorResult<()> {
        if self.object_classes.contains_key(&info.kind) {
            return Err(ConnectorError::schema(format!(
                "Object class {} defined more than once",
                info.kind
            )));
        }

        let mut seen = HashSet::new();
        for attribute in &info.attributes {
            if !seen.insert(attribute.name.as_str()) {
                return Err(ConnectorError::schema(format!(
                    "Attribute '{}' defined more than once in {}",
                    attribute.name, info.kind
                )));
            }
        }

        log::debug!(
            "Schema builder received {} with {} attributes",
            info.kind,
            info.attributes.len()
        );
        self.object_classes.insert(info.kind, info);
        Ok(())
    }

    pub fn is_defined(&self, kind: ObjectClassKind) -> bool {
        self.object_classes.contains_key(&kind)
    }

    /// Finish the catalog. Every supported kind must have been defined.
    pub fn build(self) -> ConnectorResult<SchemaDescription> {
        let missing: Vec<&str> = ObjectClassKind::ALL
            .iter()
            .filter(|kind| !self.object_classes.contains_key(kind))
            .map(|kind| kind.name())
            .collect();

        if !missing.is_empty() {
            return Err(ConnectorError::schema(format!(
                "No definition contributed for {}",
                missing.join(", ")
            )));
        }

        Ok(SchemaDescription::from_object_classes(self.object_classes))
    }
}
