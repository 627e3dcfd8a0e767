//! Incremental attribute changes.

use super::attribute::AttrValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload of an [`AttributeDelta`].
///
/// A delta either replaces the whole value list or adds/removes individual
/// values of a multi-valued attribute, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaChange {
    /// Replace the current values. An empty list clears the attribute.
    Replace(Vec<AttrValue>),
    /// Incremental membership change of a multi-valued attribute.
    #[serde(rename_all = "camelCase")]
    Modify {
        values_to_add: Vec<AttrValue>,
        values_to_remove: Vec<AttrValue>,
    },
}

/// A named change record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDelta {
    name: String,
    change: DeltaChange,
}

impl AttributeDelta {
    /// Replace all values of `name`. Pass an empty list to clear it.
    pub fn replace<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Self {
            name: name.into(),
            change: DeltaChange::Replace(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Clear `name`, i.e. replace it with zero values.
    pub fn clear(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            change: DeltaChange::Replace(Vec::new()),
        }
    }

    /// Add and remove individual values of a multi-valued attribute.
    pub fn modify<A, R, V, W>(name: impl Into<String>, add: A, remove: R) -> Self
    where
        A: IntoIterator<Item = V>,
        R: IntoIterator<Item = W>,
        V: Into<AttrValue>,
        W: Into<AttrValue>,
    {
        Self {
            name: name.into(),
            change: DeltaChange::Modify {
                values_to_add: add.into_iter().map(Into::into).collect(),
                values_to_remove: remove.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn add<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Self::modify(name, values, Vec::<AttrValue>::new())
    }

    pub fn remove<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Self::modify(name, Vec::<AttrValue>::new(), values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn change(&self) -> &DeltaChange {
        &self.change
    }

    pub fn into_parts(self) -> (String, DeltaChange) {
        (self.name, self.change)
    }

    /// Values to replace with; `Some(&[])` means "clear".
    pub fn values_to_replace(&self) -> Option<&[AttrValue]> {
        match &self.change {
            DeltaChange::Replace(values) => Some(values),
            DeltaChange::Modify { .. } => None,
        }
    }

    pub fn values_to_add(&self) -> Option<&[AttrValue]> {
        match &self.change {
            DeltaChange::Modify { values_to_add, .. } => Some(values_to_add),
            DeltaChange::Replace(_) => None,
        }
    }

    pub fn values_to_remove(&self) -> Option<&[AttrValue]> {
        match &self.change {
            DeltaChange::Modify {
                values_to_remove, ..
            } => Some(values_to_remove),
            DeltaChange::Replace(_) => None,
        }
    }

    /// A modification that adds nothing and removes nothing carries no payload.
    pub fn has_payload(&self) -> bool {
        match &self.change {
            DeltaChange::Replace(_) => true,
            DeltaChange::Modify {
                values_to_add,
                values_to_remove,
            } => !values_to_add.is_empty() || !values_to_remove.is_empty(),
        }
    }
}

impl fmt::Display for AttributeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            DeltaChange::Replace(values) => {
                write!(f, "{} replace {:?}", self.name, values)
            }
            DeltaChange::Modify {
                values_to_add,
                values_to_remove,
            } => write!(
                f,
                "{} add {:?} remove {:?}",
                self.name, values_to_add, values_to_remove
            ),
        }
    }
}
