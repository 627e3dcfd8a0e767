//! Error types for connector operations.
//!
//! The dispatcher distinguishes between argument problems it detects itself
//! (always raised before any provider call) and errors raised by the entity
//! processors, which are passed through untouched.

/// Main error type for connector operations.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// A required argument was missing or empty
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The object class is neither `__ACCOUNT__` nor `__GROUP__`
    #[error("Unsupported object class: {0}")]
    UnsupportedObjectClass(String),

    /// Error raised by an entity processor or its transport
    #[error("Provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The schema catalog could not be assembled
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Connector configuration was rejected
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Errors raised while validating a [`GraphConfiguration`](crate::config::GraphConfiguration).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required property is missing or blank
    #[error("Configuration property '{property}' is required")]
    MissingProperty { property: String },

    /// Property holds a malformed URL
    #[error("Configuration property '{property}' is not a valid http(s) URL: {value}")]
    InvalidUrl { property: String, value: String },

    /// Page size outside the range accepted by the directory
    #[error("Page size {value} is out of range ({min}..={max})")]
    PageSizeOutOfRange { value: u32, min: u32, max: u32 },

    /// Proxy host and port must be configured together
    #[error("Proxy host and proxy port must both be set or both be empty")]
    IncompleteProxy,

    /// The configuration document could not be parsed
    #[error("Malformed configuration document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ConnectorError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unsupported object class error
    pub fn unsupported_object_class(object_class: impl Into<String>) -> Self {
        Self::UnsupportedObjectClass(object_class.into())
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Wrap a provider error
    pub fn provider<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider(Box::new(error))
    }

    /// Whether this error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Whether this error reports an unsupported object class.
    pub fn is_unsupported_object_class(&self) -> bool {
        matches!(self, Self::UnsupportedObjectClass(_))
    }

    /// Borrow the provider error, if this is one.
    pub fn provider_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Provider(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl ConfigError {
    pub fn missing(property: impl Into<String>) -> Self {
        Self::MissingProperty {
            property: property.into(),
        }
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
