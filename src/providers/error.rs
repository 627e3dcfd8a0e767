//! Errors raised by the in-memory directory.

use crate::error::ConnectorError;
use crate::model::ObjectClassKind;
use thiserror::Error;

/// Failures reported by [`InMemoryDirectory`](super::InMemoryDirectory)
/// processors.
///
/// The connector never inspects these; they reach the host wrapped in
/// [`ConnectorError::Provider`] and can be recovered with `downcast_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{kind} with id '{uid}' not found")]
    NotFound {
        /// Object class of the missing object
        kind: ObjectClassKind,
        /// Identifier that was looked up
        uid: String,
    },

    #[error("Another object already has {attribute} '{value}'")]
    Duplicate {
        /// Attribute required to be unique
        attribute: String,
        /// The conflicting value
        value: String,
    },

    #[error("Required attribute '{attribute}' is missing or empty")]
    MissingAttribute {
        /// The required attribute
        attribute: String,
    },

    #[error("Attribute '{attribute}' is not defined for {kind}")]
    UnknownAttribute {
        /// Object class that was written
        kind: ObjectClassKind,
        /// The undefined attribute
        attribute: String,
    },

    #[error("Attribute '{attribute}' cannot be written")]
    ReadOnlyAttribute {
        /// The read-only attribute
        attribute: String,
    },

    #[error("Invalid value for '{attribute}': {message}")]
    InvalidValue {
        /// Attribute that received the value
        attribute: String,
        /// What was wrong with it
        message: String,
    },

    #[error("Attribute '{attribute}' is single-valued")]
    NotMultiValued {
        /// The single-valued attribute
        attribute: String,
    },

    #[error("Invalid change: {message}")]
    InvalidChange {
        /// Description of the rejected change
        message: String,
    },
}

impl ProviderError {
    pub(crate) fn not_found(kind: ObjectClassKind, uid: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            uid: uid.into(),
        }
    }

    pub(crate) fn invalid_change(message: impl Into<String>) -> Self {
        Self::InvalidChange {
            message: message.into(),
        }
    }
}

impl From<ProviderError> for ConnectorError {
    fn from(error: ProviderError) -> Self {
        ConnectorError::provider(error)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
