//! Core connector structure and lifecycle.

use crate::config::GraphConfiguration;
use crate::error::{ConnectorError, ConnectorResult};
use crate::model::{ObjectClass, ObjectClassKind, Uid};
use crate::processor::{EntityProcessor, GroupProcessor};
use crate::schema::SchemaCache;
use log::{error, info};

/// Identity-provisioning connector for directory users and groups.
///
/// The connector validates host arguments, resolves the object class to the
/// user or group processor, and sequences the provider calls. It holds no
/// per-call state; the only shared state is the schema cache, so one
/// instance can serve concurrent host requests behind an `Arc`.
///
/// # Type Parameters
///
/// * `U` - Processor for `__ACCOUNT__` objects
/// * `G` - Processor for `__GROUP__` objects
///
/// # Examples
///
/// ```rust
/// use graph_connector::config::GraphConfiguration;
/// use graph_connector::connector::GraphConnector;
/// use graph_connector::model::{Attribute, AttributeSet, ObjectClass};
/// use graph_connector::providers::InMemoryDirectory;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let directory = InMemoryDirectory::new();
/// let connector = GraphConnector::init(
///     GraphConfiguration::new("contoso", "app-id", "secret"),
///     directory.users(),
///     directory.groups(),
/// )?;
///
/// let attributes = AttributeSet::new()
///     .with(Attribute::single("userPrincipalName", "ada@contoso.com"));
/// let uid = connector
///     .create(Some(&ObjectClass::account()), Some(attributes), None)
///     .await?;
/// # let _ = uid;
/// # Ok(())
/// # }
/// ```
pub struct GraphConnector<U, G> {
    pub(super) configuration: GraphConfiguration,
    pub(super) users: U,
    pub(super) groups: G,
    pub(super) schema_cache: SchemaCache,
}

impl<U: EntityProcessor, G: GroupProcessor> GraphConnector<U, G> {
    /// Validate the configuration and build a connector around the two
    /// processors.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Configuration`] if validation fails; nothing
    /// is constructed in that case.
    pub fn init(configuration: GraphConfiguration, users: U, groups: G) -> ConnectorResult<Self> {
        info!("Initialize");
        configuration.validate()?;

        Ok(Self {
            configuration,
            users,
            groups,
            schema_cache: SchemaCache::new(),
        })
    }

    /// Replace the configuration. The cached schema is discarded.
    pub fn reinitialize(&mut self, configuration: GraphConfiguration) -> ConnectorResult<()> {
        info!("Reinitialize");
        configuration.validate()?;
        self.configuration = configuration;
        self.schema_cache.invalidate();
        Ok(())
    }

    /// Tear the connector down, releasing the processors and whatever
    /// transport they hold.
    pub fn dispose(self) {
        info!("Dispose");
    }

    pub fn configuration(&self) -> &GraphConfiguration {
        &self.configuration
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn groups(&self) -> &G {
        &self.groups
    }

    /// Check connectivity through both processors, users first.
    pub async fn test(&self) -> ConnectorResult<()> {
        info!("Test connection");
        self.users.test_connection().await?;
        self.groups.test_connection().await
    }
}

/// Resolve the object class argument, rejecting `None`.
///
/// The returned kind is `None` when the class is set but unsupported; each
/// operation decides whether that is an error or a no-op.
pub(super) fn require_object_class(
    object_class: Option<&ObjectClass>,
) -> ConnectorResult<(&ObjectClass, Option<ObjectClassKind>)> {
    match object_class {
        Some(object_class) => Ok((object_class, object_class.kind())),
        None => {
            error!("Parameter of type ObjectClass not provided.");
            Err(ConnectorError::invalid_argument(
                "Parameter of type ObjectClass not provided.",
            ))
        }
    }
}

/// Reject an empty unique identifier.
pub(super) fn require_uid(uid: &Uid) -> ConnectorResult<()> {
    if uid.is_empty() {
        error!("Parameter of type Uid not provided or is empty.");
        return Err(ConnectorError::invalid_argument(
            "Parameter of type Uid not provided or is empty.",
        ));
    }
    Ok(())
}

/// Reject a missing argument with the usual message.
pub(super) fn require<'a, T: ?Sized>(value: Option<&'a T>, type_name: &str) -> ConnectorResult<&'a T> {
    value.ok_or_else(|| {
        let message = format!("Parameter of type {} not provided.", type_name);
        error!("{}", message);
        ConnectorError::invalid_argument(message)
    })
}

/// Error for an object class this operation cannot handle.
pub(super) fn unsupported(object_class: &ObjectClass) -> ConnectorError {
    error!("The value of the ObjectClass parameter is unsupported: {}", object_class);
    ConnectorError::unsupported_object_class(object_class.name())
}
