//! Search filters handed through to the entity processors.
//!
//! The dispatcher never inspects a filter; it is forwarded as-is. The
//! evaluation helper here exists for processors that search locally.

use super::attribute::AttrValue;
use super::object::ConnectorObject;
use serde::{Deserialize, Serialize};

/// Attribute name that addresses the object's unique identifier.
pub const UID_ATTRIBUTE: &str = "__UID__";
/// Attribute name that addresses the object's display name.
pub const NAME_ATTRIBUTE: &str = "__NAME__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Filter {
    /// Any value of the attribute equals `value`
    Equals { attribute: String, value: AttrValue },
    /// Any string value contains `value`
    Contains { attribute: String, value: String },
    /// Any string value starts with `value`
    StartsWith { attribute: String, value: String },
    /// Any string value ends with `value`
    EndsWith { attribute: String, value: String },
    And { left: Box<Filter>, right: Box<Filter> },
    Or { left: Box<Filter>, right: Box<Filter> },
    Not { filter: Box<Filter> },
}

impl Filter {
    pub fn equals(attribute: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Filter::Equals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn contains(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn starts_with(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::StartsWith {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn ends_with(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::EndsWith {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn and(self, other: Filter) -> Self {
        Filter::And {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        Filter::Or {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    pub fn negate(self) -> Self {
        Filter::Not {
            filter: Box::new(self),
        }
    }

    /// Evaluate this filter against an object.
    ///
    /// `__UID__` and `__NAME__` address the object's identifier and name.
    /// String comparisons are case-insensitive, as directory searches are.
    pub fn matches(&self, object: &ConnectorObject) -> bool {
        match self {
            Filter::Equals { attribute, value } => {
                values_of(object, attribute)
                    .iter()
                    .any(|candidate| match (candidate, value) {
                        (AttrValue::String(a), AttrValue::String(b)) => a.eq_ignore_ascii_case(b),
                        (a, b) => a == b,
                    })
            }
            Filter::Contains { attribute, value } => {
                let needle = value.to_lowercase();
                string_values(object, attribute).any(|s| s.to_lowercase().contains(&needle))
            }
            Filter::StartsWith { attribute, value } => {
                let needle = value.to_lowercase();
                string_values(object, attribute).any(|s| s.to_lowercase().starts_with(&needle))
            }
            Filter::EndsWith { attribute, value } => {
                let needle = value.to_lowercase();
                string_values(object, attribute).any(|s| s.to_lowercase().ends_with(&needle))
            }
            Filter::And { left, right } => left.matches(object) && right.matches(object),
            Filter::Or { left, right } => left.matches(object) || right.matches(object),
            Filter::Not { filter } => !filter.matches(object),
        }
    }
}

fn values_of(object: &ConnectorObject, attribute: &str) -> Vec<AttrValue> {
    match attribute {
        UID_ATTRIBUTE => vec![AttrValue::from(object.uid().value())],
        NAME_ATTRIBUTE => vec![AttrValue::from(object.name())],
        _ => object
            .attributes()
            .get(attribute)
            .map(|a| a.values().to_vec())
            .unwrap_or_default(),
    }
}

fn string_values(object: &ConnectorObject, attribute: &str) -> impl Iterator<Item = String> {
    values_of(object, attribute)
        .into_iter()
        .filter_map(|value| match value {
            AttrValue::String(s) => Some(s),
            _ => None,
        })
}
