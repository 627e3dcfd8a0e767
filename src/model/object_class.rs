//! Object class names and the closed set of kinds the connector handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity types this connector knows how to provision.
///
/// Dispatch sites match on this enum exhaustively, so adding a kind forces
/// every one of them to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectClassKind {
    /// Directory user, `__ACCOUNT__`
    Account,
    /// Directory group, `__GROUP__`
    Group,
}

impl ObjectClassKind {
    /// Every supported kind, in catalog order.
    pub const ALL: [ObjectClassKind; 2] = [ObjectClassKind::Account, ObjectClassKind::Group];

    /// The host-facing object class name.
    pub fn name(self) -> &'static str {
        match self {
            ObjectClassKind::Account => ObjectClass::ACCOUNT_NAME,
            ObjectClassKind::Group => ObjectClass::GROUP_NAME,
        }
    }

    /// Resolve a host object class name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ObjectClass::ACCOUNT_NAME => Some(ObjectClassKind::Account),
            ObjectClass::GROUP_NAME => Some(ObjectClassKind::Group),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Object class as supplied by the host.
///
/// The host may send any name; only [`ObjectClass::kind`] decides whether
/// the connector supports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectClass(String);

impl ObjectClass {
    pub const ACCOUNT_NAME: &'static str = "__ACCOUNT__";
    pub const GROUP_NAME: &'static str = "__GROUP__";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn account() -> Self {
        Self::new(Self::ACCOUNT_NAME)
    }

    pub fn group() -> Self {
        Self::new(Self::GROUP_NAME)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Check whether this object class has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }

    /// Resolve to a supported kind, or `None` for anything else.
    pub fn kind(&self) -> Option<ObjectClassKind> {
        ObjectClassKind::from_name(&self.0)
    }
}

impl From<ObjectClassKind> for ObjectClass {
    fn from(kind: ObjectClassKind) -> Self {
        Self::new(kind.name())
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
